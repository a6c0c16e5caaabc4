//! Page controllers.
//!
//! Each controller runs once: read inputs, make at most one API call, then
//! either update the session and name the next page or return a rendered view.

use crate::api_client::ApiClient;
use crate::errors::PortalError;
use crate::forms::{RegistrationForm, ScoreForm};
use crate::render::{ProfileView, ResultView};
use crate::session::Session;

/// Where the portal goes after a controller finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The signed-in landing page.
    Dashboard,
    /// The page that renders the stored score result.
    Result,
}

/// Registers a user and remembers the returned id.
///
/// # Arguments
///
/// * `client` - The scoring API client.
/// * `session` - Receives the new user id.
/// * `form` - Raw registration form values.
///
/// # Returns
///
/// * `Result<Navigation, PortalError>` - `Navigation::Dashboard` on success.
pub async fn register(
    client: &ApiClient,
    session: &mut Session,
    form: &RegistrationForm,
) -> Result<Navigation, PortalError> {
    let request = form.to_request();
    let registered = client.register(&request).await?;

    tracing::info!("✓ Registered user {}", registered.id);
    session.set_user_id(registered.id);
    Ok(Navigation::Dashboard)
}

/// Requests a score for the session's user and keeps the result.
///
/// Fields that do not parse are sent as `null`; a session without a user id
/// sends `null` as well and leaves the rejection to the server.
pub async fn calculate(
    client: &ApiClient,
    session: &mut Session,
    form: &ScoreForm,
) -> Result<Navigation, PortalError> {
    let request = form.to_request(session.user_id());
    let result = client.calculate_score(&request).await?;

    tracing::info!(
        "Score {} ({}) with {} explanations",
        result.digital_trust_score,
        result.risk_category,
        result.explanation.len()
    );
    session.store_score_result(result);
    Ok(Navigation::Result)
}

/// Loads the profile of the session's user.
pub async fn load_profile(
    client: &ApiClient,
    session: &Session,
) -> Result<ProfileView, PortalError> {
    let id = session.user_id().ok_or(PortalError::NotRegistered)?;
    let profile = client.get_user(id).await?;
    Ok(ProfileView::from_profile(&profile))
}

/// Renders the stored score result; empty when nothing is stored.
pub fn render_result(session: &Session) -> ResultView {
    match session.score_result() {
        Some(result) => ResultView::from_result(result),
        None => ResultView::default(),
    }
}
