use crate::{
    config::Config,
    error::Result,
    integrations::AssistantModel,
    models::ChatTurn,
};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::interval;
use uuid::Uuid;

/// Memory of one conversation: an optional context seed plus the turns exchanged since.
#[derive(Debug)]
pub struct ChatSession {
    context: Option<String>,
    history: VecDeque<ChatTurn>,
    last_used: Instant,
}

impl ChatSession {
    fn new() -> Self {
        Self {
            context: None,
            history: VecDeque::new(),
            last_used: Instant::now(),
        }
    }

    fn reset(&mut self, context: String) {
        self.context = Some(context);
        self.history.clear();
    }

    fn prompt(&self, message: &str) -> Vec<ChatTurn> {
        let mut turns = Vec::with_capacity(self.history.len() + 2);
        if let Some(context) = &self.context {
            turns.push(ChatTurn::user(context.clone()));
        }
        turns.extend(self.history.iter().cloned());
        turns.push(ChatTurn::user(message));
        turns
    }

    /// Appends one exchange. Old exchanges are dropped whole, so the
    /// retained history always opens with a user turn.
    fn record(&mut self, message: &str, reply: &str, max_turns: usize) {
        self.history.push_back(ChatTurn::user(message));
        self.history.push_back(ChatTurn::model(reply));
        while self.history.len() > max_turns {
            self.history.pop_front();
            self.history.pop_front();
        }
    }

    fn is_idle(&self, ttl: Duration) -> bool {
        self.last_used.elapsed() >= ttl
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }
}

type SessionMap = HashMap<String, Arc<Mutex<ChatSession>>>;

/// Routes chat messages to per-session conversations backed by an [`AssistantModel`].
///
/// Each session has its own lock, held for the whole model call, so two
/// messages to the same conversation are answered one after the other while
/// other conversations proceed independently.
#[derive(Clone)]
pub struct ChatService {
    model: Arc<dyn AssistantModel>,
    sessions: Arc<RwLock<SessionMap>>,
    max_turns: usize,
    max_sessions: usize,
    session_ttl: Duration,
}

impl ChatService {
    pub fn new(
        model: Arc<dyn AssistantModel>,
        max_turns: usize,
        max_sessions: usize,
        session_ttl: Duration,
    ) -> Self {
        Self {
            model,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_turns: max_turns.max(2),
            max_sessions: max_sessions.max(1),
            session_ttl,
        }
    }

    pub fn from_config(model: Arc<dyn AssistantModel>, config: &Config) -> Self {
        Self::new(
            model,
            config.chat_history_max_turns,
            config.chat_max_sessions,
            Duration::from_secs(config.chat_session_ttl_secs),
        )
    }

    /// Sends `message` within `session_id`. A non-empty `context` starts the
    /// conversation over, seeded with that context.
    pub async fn send(
        &self,
        session_id: &str,
        message: &str,
        context: Option<&Value>,
    ) -> Result<String> {
        let session = self.session(session_id).await;
        let mut session = session.lock().await;
        session.last_used = Instant::now();

        if let Some(context) = context.and_then(render_context) {
            tracing::debug!("Chat session {} reset with new context", session_id);
            session.reset(context);
        }

        let turns = session.prompt(message);
        let reply = self.model.generate(&turns).await?;

        session.record(message, &reply, self.max_turns);
        session.last_used = Instant::now();
        tracing::debug!(
            "Chat session {}: {} turns retained (context={})",
            session_id,
            session.history_len(),
            session.has_context()
        );
        Ok(reply)
    }

    async fn session(&self, session_id: &str) -> Arc<Mutex<ChatSession>> {
        if let Some(existing) = self.sessions.read().await.get(session_id) {
            return existing.clone();
        }

        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session_id) && sessions.len() >= self.max_sessions {
            self.make_room(&mut sessions);
        }
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(ChatSession::new())))
            .clone()
    }

    /// Frees one slot at capacity: idle sessions go first, otherwise the
    /// least recently used one that is not answering right now.
    fn make_room(&self, sessions: &mut SessionMap) {
        let before = sessions.len();
        retain_active(sessions, self.session_ttl);
        if sessions.len() < self.max_sessions {
            tracing::debug!("Evicted {} idle chat sessions", before - sessions.len());
            return;
        }

        let oldest = sessions
            .iter()
            .filter_map(|(id, session)| {
                session.try_lock().ok().map(|guard| (guard.last_used, id.clone()))
            })
            .min()
            .map(|(_, id)| id);
        if let Some(id) = oldest {
            tracing::warn!("Chat session limit reached; evicting session {}", id);
            sessions.remove(&id);
        }
    }

    /// Drops sessions idle for longer than the TTL. Returns how many were removed.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        retain_active(&mut sessions, self.session_ttl);
        before - sessions.len()
    }

    /// Start the idle-session sweep loop
    pub fn start_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let chat = self.clone();
        tokio::spawn(async move {
            let mut ticker = interval(every);

            loop {
                ticker.tick().await;

                let evicted = chat.evict_idle().await;
                if evicted > 0 {
                    tracing::debug!("Chat sweeper evicted {} idle sessions", evicted);
                }
            }
        })
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn retain_active(sessions: &mut SessionMap, ttl: Duration) {
    sessions.retain(|_, session| match session.try_lock() {
        Ok(guard) => !guard.is_idle(ttl),
        // Busy sessions are in use right now.
        Err(_) => true,
    });
}

/// The caller's session id, trimmed; a blank or missing id opens a new conversation.
pub fn resolve_session_id(explicit: Option<&str>) -> String {
    explicit
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Text form of a context payload: strings verbatim, anything else as JSON.
pub fn render_context(context: &Value) -> Option<String> {
    match context {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::chat::ChatRole;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingModel {
        prompts: StdMutex<Vec<Vec<ChatTurn>>>,
    }

    #[async_trait]
    impl AssistantModel for RecordingModel {
        async fn generate(&self, turns: &[ChatTurn]) -> Result<String> {
            let mut prompts = self.prompts.lock().expect("prompts lock");
            prompts.push(turns.to_vec());
            Ok(format!("resposta {}", prompts.len()))
        }
    }

    struct FailingModel;

    #[async_trait]
    impl AssistantModel for FailingModel {
        async fn generate(&self, _turns: &[ChatTurn]) -> Result<String> {
            Err(AppError::UpstreamHttp {
                status: 429,
                body: "quota".to_string(),
            })
        }
    }

    fn service(model: Arc<dyn AssistantModel>, max_turns: usize) -> ChatService {
        ChatService::new(model, max_turns, 100, Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn history_accumulates_within_a_session() {
        let model = Arc::new(RecordingModel::default());
        let chat = service(model.clone(), 40);

        let first = chat.send("a", "oi", None).await.expect("first");
        let second = chat.send("a", "monte um deck", None).await.expect("second");
        assert_eq!(first, "resposta 1");
        assert_eq!(second, "resposta 2");

        let prompts = model.prompts.lock().expect("prompts lock");
        assert_eq!(
            prompts[1],
            vec![
                ChatTurn::user("oi"),
                ChatTurn::model("resposta 1"),
                ChatTurn::user("monte um deck"),
            ]
        );
    }

    #[tokio::test]
    async fn context_resets_and_seeds_the_session() {
        let model = Arc::new(RecordingModel::default());
        let chat = service(model.clone(), 40);

        chat.send("a", "oi", None).await.expect("first");
        let context = json!({"player": {"tag": "#2PP"}});
        chat.send("a", "e agora?", Some(&context)).await.expect("second");

        let prompts = model.prompts.lock().expect("prompts lock");
        assert_eq!(
            prompts[1],
            vec![ChatTurn::user(context.to_string()), ChatTurn::user("e agora?")]
        );
    }

    #[tokio::test]
    async fn sessions_do_not_share_history() {
        let model = Arc::new(RecordingModel::default());
        let chat = service(model.clone(), 40);

        chat.send("a", "primeira", Some(&json!("contexto A"))).await.expect("a");
        chat.send("b", "segunda", None).await.expect("b");

        let prompts = model.prompts.lock().expect("prompts lock");
        assert_eq!(prompts[1], vec![ChatTurn::user("segunda")]);
        drop(prompts);
        assert_eq!(chat.session_count().await, 2);
    }

    #[tokio::test]
    async fn history_is_bounded_but_context_survives() {
        let model = Arc::new(RecordingModel::default());
        let chat = service(model.clone(), 4);

        chat.send("a", "m1", Some(&json!("ctx"))).await.expect("m1");
        chat.send("a", "m2", None).await.expect("m2");
        chat.send("a", "m3", None).await.expect("m3");
        chat.send("a", "m4", None).await.expect("m4");

        let prompts = model.prompts.lock().expect("prompts lock");
        let last = prompts.last().expect("last prompt");
        assert_eq!(last.len(), 6);
        assert_eq!(last[0], ChatTurn::user("ctx"));
        assert_eq!(last[1], ChatTurn::user("m2"));
        assert_eq!(last[5], ChatTurn::user("m4"));
    }

    #[tokio::test]
    async fn failed_reply_leaves_history_untouched() {
        let chat = service(Arc::new(FailingModel), 40);
        let err = chat.send("a", "oi", None).await.expect_err("must fail");
        assert!(matches!(err, AppError::UpstreamHttp { status: 429, .. }));

        let session = chat.session("a").await;
        let session = session.lock().await;
        assert_eq!(session.history_len(), 0);
        assert!(!session.has_context());
    }

    #[tokio::test]
    async fn odd_bound_keeps_history_opening_with_user_turn() {
        let model = Arc::new(RecordingModel::default());
        let chat = service(model.clone(), 3);

        chat.send("a", "m1", None).await.expect("m1");
        chat.send("a", "m2", None).await.expect("m2");
        chat.send("a", "m3", None).await.expect("m3");

        let prompts = model.prompts.lock().expect("prompts lock");
        let last = prompts.last().expect("last prompt");
        assert_eq!(
            last,
            &vec![
                ChatTurn::user("m2"),
                ChatTurn::model("resposta 2"),
                ChatTurn::user("m3"),
            ]
        );
        for prompt in prompts.iter() {
            assert_eq!(prompt[0].role, ChatRole::User);
        }
    }

    #[tokio::test]
    async fn idle_sessions_are_swept() {
        let chat = ChatService::new(
            Arc::new(RecordingModel::default()),
            40,
            100,
            Duration::from_millis(50),
        );
        chat.send("old", "oi", None).await.expect("old");
        tokio::time::sleep(Duration::from_millis(80)).await;
        chat.send("new", "oi", None).await.expect("new");
        assert_eq!(chat.session_count().await, 2);

        assert_eq!(chat.evict_idle().await, 1);
        assert_eq!(chat.session_count().await, 1);
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(chat.evict_idle().await, 1);
        assert_eq!(chat.session_count().await, 0);
    }

    #[tokio::test]
    async fn sweeper_task_evicts_in_background() {
        let chat = ChatService::new(
            Arc::new(RecordingModel::default()),
            40,
            100,
            Duration::from_millis(10),
        );
        chat.send("a", "oi", None).await.expect("a");
        let sweeper = chat.start_sweeper(Duration::from_millis(5));
        tokio::time::sleep(Duration::from_millis(60)).await;
        sweeper.abort();
        assert_eq!(chat.session_count().await, 0);
    }

    #[tokio::test]
    async fn session_count_is_capped() {
        let chat = ChatService::new(
            Arc::new(RecordingModel::default()),
            40,
            2,
            Duration::from_secs(3600),
        );
        chat.send("a", "oi", None).await.expect("a");
        tokio::time::sleep(Duration::from_millis(5)).await;
        chat.send("b", "oi", None).await.expect("b");
        tokio::time::sleep(Duration::from_millis(5)).await;
        chat.send("c", "oi", None).await.expect("c");

        assert_eq!(chat.session_count().await, 2);
        let sessions = chat.sessions.read().await;
        assert!(!sessions.contains_key("a"));
        assert!(sessions.contains_key("b"));
        assert!(sessions.contains_key("c"));
    }

    #[test]
    fn missing_session_id_opens_a_new_conversation() {
        assert_eq!(resolve_session_id(Some(" abc ")), "abc");

        let first = resolve_session_id(None);
        let second = resolve_session_id(Some("  "));
        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert!(Uuid::parse_str(&second).is_ok());
    }

    #[test]
    fn context_rendering() {
        assert_eq!(render_context(&json!("texto")), Some("texto".to_string()));
        assert_eq!(render_context(&json!("  ")), None);
        assert_eq!(render_context(&Value::Null), None);
        assert_eq!(render_context(&json!({"a": 1})), Some(r#"{"a":1}"#.to_string()));
    }
}
