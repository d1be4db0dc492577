use crate::fetch::FetchError;

#[derive(Debug)]
pub enum ProviderError {
    /// The site served its login page instead of the requested title.
    LoginWall { url: String },
    Fetch(FetchError),
    InvalidUrl { url: String },
}

impl ProviderError {
    /// Login walls are terminal: retrying without credentials gets the same page.
    pub fn is_login_wall(&self) -> bool {
        matches!(self, ProviderError::LoginWall { .. })
    }
}

impl From<FetchError> for ProviderError {
    fn from(err: FetchError) -> Self {
        ProviderError::Fetch(err)
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::LoginWall { url } => write!(
                f,
                "{url} is locked behind a login wall on the website, unable to scrape it"
            ),
            ProviderError::Fetch(err) => write!(f, "fetch failed: {err}"),
            ProviderError::InvalidUrl { url } => write!(f, "invalid url: {url}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Fetch(err) => Some(err),
            _ => None,
        }
    }
}
