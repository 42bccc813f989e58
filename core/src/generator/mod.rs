use async_trait::async_trait;

/// Free-text generation backend fed with a fully rendered prompt.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
