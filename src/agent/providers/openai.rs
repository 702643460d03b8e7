//! Chat completions over `async-openai`.
//!
//! Any endpoint speaking the `OpenAI` chat protocol works; point
//! [`AgentConfig::base_url`] at it.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessage,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestToolMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
    ChatCompletionToolType, CreateChatCompletionRequest, CreateChatCompletionResponse,
    FunctionCall, FunctionObject,
};
use async_trait::async_trait;
use tracing::debug;

use crate::agent::config::AgentConfig;
use crate::agent::message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
use crate::agent::provider::LlmProvider;
use crate::agent::tool::{ToolCall, ToolDefinition};
use crate::error::AgentError;

/// Assistant model backed by an `OpenAI`-compatible endpoint.
///
/// Every call is bounded by [`AgentConfig::timeout`].
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    timeout: Duration,
}

impl OpenAiProvider {
    /// Builds a client from the configured key and optional base URL.
    #[must_use]
    pub fn new(config: &AgentConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(&config.api_key);

        if let Some(ref base_url) = config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }

        Self {
            client: Client::with_config(openai_config),
            timeout: config.timeout,
        }
    }

    /// Maps a transcript entry onto the wire message.
    ///
    /// Human turns go out as `user`, AI turns as `assistant` (with their tool
    /// request, if any), tool results as `tool` keyed by the call id.
    fn convert_message(msg: &ChatMessage) -> ChatCompletionRequestMessage {
        match msg.role {
            Role::System => {
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: async_openai::types::ChatCompletionRequestSystemMessageContent::Text(
                        msg.content.clone(),
                    ),
                    name: None,
                })
            }
            Role::Human => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: async_openai::types::ChatCompletionRequestUserMessageContent::Text(
                    msg.content.clone(),
                ),
                name: None,
            }),
            Role::Ai => {
                let tool_calls = msg.tool_call.as_ref().map(|tc| {
                    vec![ChatCompletionMessageToolCall {
                        id: tc.id.clone(),
                        r#type: ChatCompletionToolType::Function,
                        function: FunctionCall {
                            name: tc.name.clone(),
                            arguments: tc.arguments.clone(),
                        },
                    }]
                });

                let content = if msg.content.is_empty() {
                    None
                } else {
                    Some(
                        async_openai::types::ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        ),
                    )
                };

                #[allow(deprecated)]
                ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                    content,
                    name: None,
                    tool_calls,
                    refusal: None,
                    audio: None,
                    function_call: None,
                })
            }
            Role::Tool => ChatCompletionRequestMessage::Tool(ChatCompletionRequestToolMessage {
                content: async_openai::types::ChatCompletionRequestToolMessageContent::Text(
                    msg.content.clone(),
                ),
                tool_call_id: msg.tool_call_id.clone().unwrap_or_default(),
            }),
        }
    }

    fn tool_spec(definition: &ToolDefinition) -> ChatCompletionTool {
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: definition.name.clone(),
                description: Some(definition.description.clone()),
                parameters: Some(definition.parameters.clone()),
                strict: None,
            },
        }
    }

    fn build_request(request: &ChatRequest) -> CreateChatCompletionRequest {
        let tools = (!request.tools.is_empty())
            .then(|| request.tools.iter().map(Self::tool_spec).collect());

        CreateChatCompletionRequest {
            model: request.model.clone(),
            messages: request.messages.iter().map(Self::convert_message).collect(),
            temperature: request.temperature,
            max_completion_tokens: request.max_tokens,
            tools,
            ..Default::default()
        }
    }

    /// Reads the first choice; a response without choices yields an empty
    /// reply rather than an error.
    fn parse_response(response: CreateChatCompletionResponse) -> ChatResponse {
        let usage = response
            .usage
            .map_or_else(TokenUsage::default, |u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            });

        let Some(choice) = response.choices.into_iter().next() else {
            return ChatResponse {
                usage,
                ..ChatResponse::default()
            };
        };

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        ChatResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
            tool_calls,
            finish_reason: choice
                .finish_reason
                .and_then(|reason| serde_json::to_value(reason).ok())
                .and_then(|reason| reason.as_str().map(ToString::to_string)),
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("client", &"<async-openai::Client>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AgentError> {
        let body = Self::build_request(request);
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "sending chat completion"
        );

        let response = tokio::time::timeout(
            self.timeout,
            self.client.chat().create(body),
        )
        .await
        .map_err(|_| AgentError::ApiRequest {
            message: format!("request timed out after {:?}", self.timeout),
            status: None,
        })?
        .map_err(|e| AgentError::ApiRequest {
            message: e.to_string(),
            status: None,
        })?;

        let reply = Self::parse_response(response);
        debug!(
            tool_calls = reply.tool_calls.len(),
            total_tokens = reply.usage.total_tokens,
            finish_reason = ?reply.finish_reason,
            "chat completion received"
        );
        Ok(reply)
    }
}
