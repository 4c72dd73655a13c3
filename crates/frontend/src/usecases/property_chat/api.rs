use contracts::chat::{ChatRequest, ChatResponse};
use gloo_net::http::Request;

/// Отправить текст запроса на бэкенд и получить ответ чата.
pub async fn send_message(url: &str, message: &str) -> Result<ChatResponse, String> {
    let response = Request::post(url)
        .json(&ChatRequest {
            message: message.to_string(),
        })
        .map_err(|e| format!("Failed to encode request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let data: ChatResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))?;

    Ok(data)
}
