use thiserror::Error;

/// Rejections shown to the user as a dialog. None of them mutate state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Price must be float and quantity must be int")]
    InvalidNumbers,

    #[error("Invalid input")]
    InvalidEditInput,

    #[error("Fill all fields")]
    MissingFields,

    #[error("No item selected")]
    NoSelection,

    #[error("Invalid quantity to sell")]
    InvalidSellInput,

    #[error("Invalid quantity")]
    InvalidSellQuantity,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("Incorrect current password.")]
    IncorrectCurrentPassword,

    #[error("Password cannot be empty.")]
    EmptyPassword,

    #[error("Password cannot be empty. Exiting.")]
    EmptyInitialPassword,

    #[error("Owner password is already set.")]
    PasswordAlreadySet,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("No items have been sold yet.")]
    NoSales,
}

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InventoryError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            InventoryError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
