use std::fmt;

/// The three remote operations the client can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /query`
    Send,
    /// `POST /query?debate=true`
    Debate,
    /// `POST /prepare`
    Prepare,
}

impl Operation {
    /// The fixed, user-facing text shown when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Send => "Failed to send message. Please check if the backend is running.",
            Operation::Debate => "Failed to generate debate.",
            Operation::Prepare => "Failed to prepare topic.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Send => write!(f, "send"),
            Operation::Debate => write!(f, "debate"),
            Operation::Prepare => write!(f, "prepare"),
        }
    }
}

/// The only error a remote call surfaces to the controller.
///
/// Transport details (status codes, connection errors, bad JSON) are logged
/// where they happen and never travel further than this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFailed {
    pub operation: Operation,
    pub message: String,
}

impl OperationFailed {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            message: operation.failure_message().to_string(),
        }
    }
}

impl fmt::Display for OperationFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for OperationFailed {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_fixed_message() {
        let err = OperationFailed::new(Operation::Prepare);
        assert_eq!(err.message, "Failed to prepare topic.");
        assert_eq!(err.to_string(), "Failed to prepare topic.");
    }

    #[test]
    fn test_each_operation_has_distinct_message() {
        let send = Operation::Send.failure_message();
        let debate = Operation::Debate.failure_message();
        let prepare = Operation::Prepare.failure_message();
        assert_ne!(send, debate);
        assert_ne!(debate, prepare);
        assert!(send.contains("backend is running"));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Send.to_string(), "send");
        assert_eq!(Operation::Debate.to_string(), "debate");
        assert_eq!(Operation::Prepare.to_string(), "prepare");
    }
}
