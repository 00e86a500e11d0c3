//! Route guard - decides whether a page request may proceed.

/// Path of the sign-in page.
pub const LOGIN_PATH: &str = "/login";
/// Path of the home page.
pub const HOME_PATH: &str = "/";

/// How a route is treated by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Post creation and editing pages.
    Protected,
    /// The sign-in page.
    Login,
    /// Everything else.
    Public,
}

/// Outcome of the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

impl GuardDecision {
    /// Target of the redirect, if any.
    pub fn location(self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

impl RouteClass {
    /// Classify a request path.
    pub fn of_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        if path == LOGIN_PATH {
            return RouteClass::Login;
        }

        let protected = path == "/criar-noticia"
            || path == "/editar-noticia"
            || path.starts_with("/editar-noticia/")
            || (path.starts_with("/noticia/") && path.ends_with("/excluir"));

        if protected {
            RouteClass::Protected
        } else {
            RouteClass::Public
        }
    }
}

/// Decide what to do with a request given its route class and whether the
/// requester holds a valid session.
pub fn guard(class: RouteClass, has_session: bool) -> GuardDecision {
    match (class, has_session) {
        (RouteClass::Protected, false) => GuardDecision::RedirectToLogin,
        (RouteClass::Login, true) => GuardDecision::RedirectToHome,
        _ => GuardDecision::Allow,
    }
}
