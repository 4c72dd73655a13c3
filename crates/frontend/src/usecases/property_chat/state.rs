use contracts::chat::ChatResponse;
use leptos::prelude::*;

/// Состояние страницы запроса.
///
/// `response` хранит последний успешный ответ и назад в `None` не
/// возвращается — только перезаписывается следующим успешным запросом.
/// Переходы вынесены в методы без DOM-зависимостей, чтобы их можно было
/// тестировать как обычный код.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatPageState {
    pub query_text: String,
    pub response: Option<ChatResponse>,
    pub error: Option<String>,
    /// Номер последнего выданного запроса; 0 — ещё не отправляли
    pub latest_seq: u64,
    pub in_flight: bool,
}

impl ChatPageState {
    /// Текст заменяется как есть: без trim и валидации.
    pub fn set_query(&mut self, value: String) {
        self.query_text = value;
    }

    /// Выдать номер новому запросу; предыдущие номера с этого момента устарели.
    pub fn begin_request(&mut self) -> u64 {
        self.latest_seq += 1;
        self.in_flight = true;
        self.error = None;
        self.latest_seq
    }

    /// Применить исход запроса `seq`.
    ///
    /// Ответ устаревшего запроса (не последнего выданного) игнорируется
    /// целиком; при ошибке прошлый ответ остаётся на экране.
    pub fn finish_request(&mut self, seq: u64, outcome: Result<ChatResponse, String>) {
        if seq != self.latest_seq {
            return;
        }
        self.in_flight = false;
        match outcome {
            Ok(response) => {
                self.response = Some(response);
                self.error = None;
            }
            Err(reason) => {
                self.error = Some(reason);
            }
        }
    }
}

pub fn create_state() -> RwSignal<ChatPageState> {
    RwSignal::new(ChatPageState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(message: &str) -> ChatResponse {
        ChatResponse {
            message: Some(message.to_string()),
            results: None,
        }
    }

    #[test]
    fn query_text_is_replaced_verbatim() {
        let mut state = ChatPageState::default();
        state.set_query("  3BHK in Pune  ".to_string());
        assert_eq!(state.query_text, "  3BHK in Pune  ");
    }

    #[test]
    fn no_response_before_first_request() {
        let state = ChatPageState::default();
        assert!(state.response.is_none());
        assert!(state.error.is_none());
        assert!(!state.in_flight);
    }

    #[test]
    fn successful_request_stores_the_response() {
        let mut state = ChatPageState::default();
        let seq = state.begin_request();
        assert!(state.in_flight);

        state.finish_request(seq, Ok(reply("Found 2")));
        assert!(!state.in_flight);
        assert_eq!(state.response, Some(reply("Found 2")));
        assert!(state.error.is_none());
    }

    #[test]
    fn failure_keeps_the_previous_response_visible() {
        let mut state = ChatPageState::default();
        let first = state.begin_request();
        state.finish_request(first, Ok(reply("Found 2")));

        let second = state.begin_request();
        state.finish_request(second, Err("Request failed".to_string()));

        assert_eq!(state.response, Some(reply("Found 2")));
        assert_eq!(state.error.as_deref(), Some("Request failed"));
        assert!(!state.in_flight);
    }

    #[test]
    fn stale_response_is_dropped_entirely() {
        let mut state = ChatPageState::default();
        let first = state.begin_request();
        let second = state.begin_request();

        // Первый запрос вернулся после того, как второй был отправлен
        state.finish_request(first, Ok(reply("stale")));
        assert!(state.response.is_none());
        assert!(state.in_flight);

        state.finish_request(second, Ok(reply("fresh")));
        assert_eq!(state.response, Some(reply("fresh")));
    }

    #[test]
    fn out_of_order_resolution_keeps_the_latest_request() {
        let mut state = ChatPageState::default();
        let first = state.begin_request();
        let second = state.begin_request();

        // Второй (последний выданный) завершился раньше первого
        state.finish_request(second, Ok(reply("fresh")));
        state.finish_request(first, Ok(reply("stale")));

        assert_eq!(state.response, Some(reply("fresh")));
    }

    #[test]
    fn new_request_clears_a_previous_error() {
        let mut state = ChatPageState::default();
        let first = state.begin_request();
        state.finish_request(first, Err("boom".to_string()));
        assert!(state.error.is_some());

        state.begin_request();
        assert!(state.error.is_none());
    }
}
