/// Client-side acknowledgment for a recruiter joining the payments waitlist.
///
/// Nothing is persisted and the store is never contacted; this only keeps the
/// recruiter informed until credits launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessAcknowledgment {
    pub email: String,
}

impl AccessAcknowledgment {
    pub fn message(&self) -> String {
        format!("Thanks! We sent a confirmation to {}. You are on the list.", self.email)
    }
}

/// `None` when the prompt was cancelled or the answer has no `@`.
pub fn request_access(input: Option<&str>) -> Option<AccessAcknowledgment> {
    let email = input?.trim();
    if email.contains('@') {
        tracing::debug!("Waitlist request acknowledged");
        Some(AccessAcknowledgment { email: email.to_string() })
    } else {
        None
    }
}
