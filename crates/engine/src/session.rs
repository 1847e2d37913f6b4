/// Holder of the access token issued at login.
///
/// The engine only asks whether a token exists; storing and injecting it is
/// the implementor's business.
pub trait AuthSession {
    fn current_token(&self) -> Option<&str>;
}

/// First screen shown when the client starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialView {
    Login,
    Tracker,
}

pub fn initial_view<S: AuthSession + ?Sized>(session: &S) -> InitialView {
    match session.current_token() {
        Some(token) if !token.trim().is_empty() => InitialView::Tracker,
        _ => InitialView::Login,
    }
}
