// generate.rs
// LLM docstring generation via the OpenAI chat completions API

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;

const SYSTEM_PROMPT: &str = "\
You are an accomplished programmer with expertise in various programming languages, including Python.
Your task is to write a sophisticated, well-documented docstring for a given Python function or class.
You must adhere to the Google Python Style Guide and PEP 8 standards.
It is preferred to include examples in your docstring to illustrate the functionality of the function or class.

You are allowed to use the following fields for your docstring:
- Attributes
- Args
- Returns
- Yields
- Raises
- Examples
- Note
- Todo
";

/// Configuration for LLM generation
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub credentials: Credentials,
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        // Note: The openai crate expects OPENAI_KEY not OPENAI_API_KEY
        let api_key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("OPENAI_KEY"))
            .unwrap_or_default();
        let base_url = std::env::var("OPENAI_BASE_URL").unwrap_or_default();

        Self {
            credentials: Credentials::new(api_key, base_url),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            temperature: 1.0,
            top_p: 0.8,
        }
    }
}

/// The external docstring service, kept behind a trait so the pipeline can
/// be driven by a stub in tests. Returns the raw model output; the planner
/// extracts the delimited docstring block from it.
#[async_trait]
pub trait DocstringSource {
    async fn request_docstring(
        &self,
        source_code: &str,
        name: &str,
        package: &str,
    ) -> Result<String>;
}

/// OpenAI-backed implementation. One blocking request per definition; no
/// retry, no timeout policy, no rate limiting.
pub struct OpenAiSource {
    config: GenerationConfig,
}

impl OpenAiSource {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DocstringSource for OpenAiSource {
    async fn request_docstring(
        &self,
        source_code: &str,
        name: &str,
        package: &str,
    ) -> Result<String> {
        let prompt = build_prompt(source_code, name, package);

        let messages = vec![
            ChatCompletionMessage {
                role: ChatCompletionMessageRole::System,
                content: Some(SYSTEM_PROMPT.to_string()),
                name: None,
                function_call: None,
                tool_call_id: None,
                tool_calls: None,
            },
            ChatCompletionMessage {
                role: ChatCompletionMessageRole::User,
                content: Some(prompt),
                name: None,
                function_call: None,
                tool_call_id: None,
                tool_calls: None,
            },
        ];

        let response = ChatCompletion::builder(&self.config.model, messages)
            .credentials(self.config.credentials.clone())
            .temperature(self.config.temperature)
            .top_p(self.config.top_p)
            .create()
            .await
            .map_err(|e| anyhow!("OpenAI API error for {name}: {e}"))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| anyhow!("no response content from OpenAI for {name}"))?;

        Ok(content.clone())
    }
}

/// The user prompt: the definition being documented plus the entire file, so
/// the model sees the surrounding context.
fn build_prompt(source_code: &str, name: &str, package: &str) -> String {
    format!(
        "Please generate a docstring for the {name}, which is part of the {package} package.
Include only docstrings, and do not include anything else.
If there is already a docstring, update it accordingly.

**Entire Python code**

```python
{source_code}
```

**Docstring**
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_definition_and_package() {
        let prompt = build_prompt("def foo():\n    pass\n", "foo", "pkg/mod.py");
        assert!(prompt.contains("docstring for the foo"));
        assert!(prompt.contains("part of the pkg/mod.py package"));
        assert!(prompt.contains("def foo():"));
    }

    #[test]
    fn default_config_uses_original_sampling() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.top_p, 0.8);
    }
}
