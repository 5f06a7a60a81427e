use crate::error::{CouncilError, Result};

/// Who is operating the admin panel.
///
/// Login is a placeholder: any named operator counts as signed in. Screens
/// take this value at construction and refuse to build without an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    operator: Option<String>,
}

impl AuthContext {
    pub fn signed_in(operator: impl Into<String>) -> Self {
        let operator = operator.into();
        if operator.trim().is_empty() {
            return Self::anonymous();
        }
        Self {
            operator: Some(operator),
        }
    }

    pub fn anonymous() -> Self {
        Self { operator: None }
    }

    pub fn from_operator(operator: Option<&str>) -> Self {
        operator.map(Self::signed_in).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.operator.is_some()
    }

    /// The operator's name, or `Unauthenticated`.
    pub fn require(&self) -> Result<&str> {
        self.operator.as_deref().ok_or(CouncilError::Unauthenticated)
    }
}
