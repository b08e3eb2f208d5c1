/// Application constants

pub const API_VERSION: &str = "v1";
pub const SERVICE_BANNER: &str = "Clash Royale IA Deckbuilder - Backend ativo!";

// Upstream defaults
pub const DEFAULT_CLASH_API_URL: &str = "https://api.clashroyale.com/v1";
pub const DEFAULT_CLASH_API_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
pub const EGRESS_IP_LOOKUP_URL: &str = "https://api.ipify.org";

// Chat sessions
pub const DEFAULT_CHAT_HISTORY_MAX_TURNS: usize = 40;
pub const DEFAULT_CHAT_SESSION_TTL_SECS: u64 = 3600;
pub const DEFAULT_CHAT_MAX_SESSIONS: usize = 1000;
pub const CHAT_SWEEP_INTERVAL_SECS: u64 = 60;

// Player normalization
pub const UNKNOWN_ARENA_NAME: &str = "Arena desconhecida";

// User-facing messages (pt-BR, consumed directly by the frontend)
pub const MSG_TAG_REQUIRED: &str = "TAG do jogador é obrigatória.";
pub const MSG_EMPTY_MESSAGE: &str = "Mensagem vazia.";
pub const MSG_PLAYER_FAILED: &str = "Falha ao carregar jogador. Confira a TAG.";
pub const MSG_CARDS_FAILED: &str = "Falha ao carregar lista de cartas.";
pub const MSG_CHAT_FAILED: &str = "Falha ao conversar com a IA.";
