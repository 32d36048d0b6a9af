use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use medlens::application::ports::{
    ChatModel, ConversationRepository, DiseaseClassifier, LlmClient, UploadStore,
};
use medlens::application::services::{
    AnalysisConfig, AnalysisService, ChatService, DEFAULT_ANALYSIS_PROMPT, SessionReaper,
    UploadService,
};
use medlens::infrastructure::classification::{
    ScaffoldClassifier, WhoIcdClassifier, WhoIcdEndpoints,
};
use medlens::infrastructure::http::{RetryPolicy, build_http_client};
use medlens::infrastructure::llm::{
    GeminiChatModel, OpenAiCompletionClient, ScaffoldChatModel, ScaffoldLlmClient,
};
use medlens::infrastructure::observability::{TracingConfig, init_tracing};
use medlens::infrastructure::persistence::InMemoryConversationRepository;
use medlens::infrastructure::storage::LocalUploadStore;
use medlens::infrastructure::text_processing::CompositeFileLoader;
use medlens::presentation::{
    AppState, Environment, RouterOptions, ScaffoldConfig, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    let scaffold_config = ScaffoldConfig::default();
    if scaffold_config.enabled {
        tracing::warn!(
            delay_ms = scaffold_config.mock_response_delay_ms,
            "Scaffold mode enabled, external APIs are replaced by local stand-ins"
        );
    } else {
        let missing = settings.missing_secrets();
        if !missing.is_empty() {
            anyhow::bail!("Missing required secrets: {}", missing.join(", "));
        }
    }

    let upload_store: Arc<dyn UploadStore> = Arc::new(
        LocalUploadStore::new(settings.storage.upload_root.clone())
            .context("Failed to prepare upload directory")?,
    );

    let (llm_client, chat_model, classifier) = if scaffold_config.enabled {
        let delay = scaffold_config.response_delay();
        let llm_client: Arc<dyn LlmClient> = Arc::new(ScaffoldLlmClient::new(delay));
        let chat_model: Arc<dyn ChatModel> = Arc::new(ScaffoldChatModel::new(delay));
        let classifier: Arc<dyn DiseaseClassifier> = Arc::new(ScaffoldClassifier);
        (llm_client, chat_model, classifier)
    } else {
        build_live_backends(&settings)?
    };

    let conversation_repository: Arc<dyn ConversationRepository> =
        Arc::new(InMemoryConversationRepository::new());

    let analysis_config = AnalysisConfig {
        system_prompt: settings
            .llm
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_ANALYSIS_PROMPT.to_string()),
        max_query_chars: settings.classification.max_query_chars,
        classification_failure_policy: settings.classification.failure_policy,
    };

    let state = AppState {
        upload_service: Arc::new(UploadService::new(Arc::clone(&upload_store))),
        analysis_service: Arc::new(AnalysisService::new(
            Arc::new(CompositeFileLoader::with_default_adapters()),
            llm_client,
            classifier,
            Arc::clone(&upload_store),
            analysis_config,
        )),
        chat_service: Arc::new(ChatService::new(
            chat_model,
            Arc::clone(&conversation_repository),
            settings.chat.max_history_messages,
        )),
    };

    let reaper = SessionReaper::new(
        conversation_repository,
        Duration::from_secs(settings.chat.session_idle_timeout_seconds),
        Duration::from_secs(settings.chat.eviction_interval_seconds.max(1)),
    );
    tokio::spawn(reaper.run());

    let router = create_router(
        state,
        &RouterOptions {
            max_upload_bytes: settings.max_upload_bytes(),
            static_dir: settings.server.static_dir.clone(),
        },
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

type LiveBackends = (
    Arc<dyn LlmClient>,
    Arc<dyn ChatModel>,
    Arc<dyn DiseaseClassifier>,
);

fn build_live_backends(settings: &Settings) -> anyhow::Result<LiveBackends> {
    let client = build_http_client(settings.http.timeout())?;
    let retry = RetryPolicy {
        max_retries: settings.http.max_retries,
        initial_backoff: settings.http.initial_backoff(),
    };

    let llm = &settings.llm;
    let llm_client: Arc<dyn LlmClient> = Arc::new(OpenAiCompletionClient::new(
        client.clone(),
        &llm.base_url,
        llm.api_key.clone().unwrap_or_default(),
        llm.model.clone(),
        llm.max_tokens,
        llm.temperature,
        retry,
    ));

    let chat = &settings.chat;
    let chat_model: Arc<dyn ChatModel> = Arc::new(GeminiChatModel::new(
        client.clone(),
        &chat.base_url,
        chat.api_key.clone().unwrap_or_default(),
        chat.model.clone(),
        chat.system_instruction.clone(),
        retry,
    ));

    let icd = &settings.classification;
    let classifier: Arc<dyn DiseaseClassifier> = Arc::new(WhoIcdClassifier::new(
        client,
        WhoIcdEndpoints {
            token_url: icd.token_url.clone(),
            search_url: icd.search_url.clone(),
        },
        icd.client_id.clone().unwrap_or_default(),
        icd.client_secret.clone().unwrap_or_default(),
        icd.language.clone(),
        icd.max_results,
        retry,
    ));

    Ok((llm_client, chat_model, classifier))
}
