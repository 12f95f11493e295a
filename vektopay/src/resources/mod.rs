//! Typed operations on the [`Client`](crate::Client), one module per resource.
//!
//! | Resource          | Credential | Operations                                          |
//! |-------------------|------------|-----------------------------------------------------|
//! | payments          | API key    | create, status, poll status                         |
//! | customers         | bearer     | create, list, get, update, delete                   |
//! | checkout sessions | API key    | create                                              |
//! | legacy            | API key    | charges and transactions served by payment routes   |

mod checkout_sessions;
mod customers;
mod legacy;
mod payments;

use crate::{
    dispatch::encode_path_segment,
    error::{Result, VektopayError},
};

/// Validates a caller-supplied id and encodes it as one path segment.
fn id_segment(kind: &str, id: &str) -> Result<String> {
    if id.trim().is_empty() {
        return Err(VektopayError::InvalidInput(format!("{kind} id cannot be empty")));
    }
    if matches!(id, "." | "..") {
        return Err(VektopayError::InvalidInput(format!("{kind} id cannot be a dot segment")));
    }
    Ok(encode_path_segment(id))
}
