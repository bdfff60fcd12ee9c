use serde_json::Value;

/// Result of one emeter query, keeping the reason when no data was returned
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T> {
    /// The device answered with status code 0
    Success(T),
    /// The device gave no response for the command
    Empty,
    /// The device answered with a non-zero status code, `None` if the code was missing
    Failure(Option<i64>),
}

impl<T> QueryOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryOutcome::Success(_))
    }

    /// Collapses empty and failed outcomes into `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            QueryOutcome::Success(v) => Some(v),
            QueryOutcome::Empty | QueryOutcome::Failure(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> QueryOutcome<U> {
        match self {
            QueryOutcome::Success(v) => QueryOutcome::Success(f(v)),
            QueryOutcome::Empty => QueryOutcome::Empty,
            QueryOutcome::Failure(code) => QueryOutcome::Failure(code),
        }
    }

    pub fn try_map<U, E, F: FnOnce(T) -> Result<U, E>>(self, f: F) -> Result<QueryOutcome<U>, E> {
        match self {
            QueryOutcome::Success(v) => Ok(QueryOutcome::Success(f(v)?)),
            QueryOutcome::Empty => Ok(QueryOutcome::Empty),
            QueryOutcome::Failure(code) => Ok(QueryOutcome::Failure(code)),
        }
    }
}

impl<T: Default> QueryOutcome<T> {
    /// Collapses empty and failed outcomes into the default value, e.g. an empty list
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

/// Classifies a device response envelope by its `err_code` status field
///
/// # Arguments
///
/// * 'envelope' - the response, if any, as returned by the pass-through channel
pub fn classify(envelope: Option<Value>) -> QueryOutcome<Value> {
    match envelope {
        None => QueryOutcome::Empty,
        Some(doc) => match doc.get("err_code").and_then(Value::as_i64) {
            Some(0) => QueryOutcome::Success(doc),
            code => QueryOutcome::Failure(code),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_status_is_success() {
        let doc = json!({"err_code": 0, "power_mw": 1});
        assert_eq!(classify(Some(doc.clone())), QueryOutcome::Success(doc));
    }

    #[test]
    fn absent_envelope_is_empty() {
        assert_eq!(classify(None), QueryOutcome::Empty);
    }

    #[test]
    fn non_zero_or_missing_status_is_failure() {
        assert_eq!(classify(Some(json!({"err_code": -1, "err_msg": "module not support"}))), QueryOutcome::Failure(Some(-1)));
        assert_eq!(classify(Some(json!({"power_mw": 1}))), QueryOutcome::Failure(None));
        assert_eq!(classify(Some(json!({}))), QueryOutcome::Failure(None));
        assert_eq!(classify(Some(json!("0"))), QueryOutcome::Failure(None));
    }

    #[test]
    fn collapsing_views() {
        assert_eq!(QueryOutcome::Success(vec![1]).unwrap_or_default(), vec![1]);
        assert_eq!(QueryOutcome::<Vec<u8>>::Failure(Some(3)).unwrap_or_default(), Vec::<u8>::new());
        assert_eq!(QueryOutcome::<u8>::Empty.into_option(), None);
        assert_eq!(QueryOutcome::Success(2).map(|v| v * 2), QueryOutcome::Success(4));
    }
}
