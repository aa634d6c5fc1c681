use serde_json::Value;

/// What the board said about a submitted application.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationResult {
    /// `{"error": {"type": "captcha"}}`: a human has to solve the captcha in a browser.
    Captcha,
    /// An `error` object of any other type, or with none.
    Rejected { kind: Option<String>, body: Value },
    /// `{"response": {...}}`
    Submitted(Value),
    /// Neither `error` nor `response`.
    Anomaly(Value),
}

impl ApplicationResult {
    /// Classifies a decoded response body. `error` wins over `response`.
    pub fn from_body(body: Value) -> Self {
        if let Some(error) = body.get("error").filter(|e| is_truthy(e)) {
            let kind = error
                .get("type")
                .and_then(Value::as_str)
                .map(str::to_owned);
            if kind.as_deref() == Some("captcha") {
                return ApplicationResult::Captcha;
            }
            return ApplicationResult::Rejected { kind, body };
        }

        match body.get("response") {
            Some(response) => ApplicationResult::Submitted(response.clone()),
            None => ApplicationResult::Anomaly(body),
        }
    }

    /// Free-text `message` the board attaches to some refusals,
    /// e.g. the monthly cap "Можно оставлять не более 30 откликов в месяц".
    pub fn message(&self) -> Option<&str> {
        let body = match self {
            ApplicationResult::Rejected { body, .. } | ApplicationResult::Anomaly(body) => body,
            _ => return None,
        };
        body.get("message")
            .or_else(|| body.get("error").and_then(|e| e.get("message")))
            .and_then(Value::as_str)
    }
}

// An empty `error` object or a null means no error.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
    }
}
