use std::fmt;

use crate::error::{AppError, AppResult};

/// Post opened when a post card carries no id.
pub const DEFAULT_POST_ID: &str = "1";

/// A page the client can redirect to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Search { query: String },
    TiebaDetail { name: String },
    PostDetail { id: String },
}

impl Route {
    /// Search route for a submitted query. Blank queries go nowhere.
    pub fn search(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            None
        } else {
            Some(Self::Search {
                query: query.to_string(),
            })
        }
    }

    pub fn tieba(name: impl Into<String>) -> Self {
        Self::TiebaDetail { name: name.into() }
    }

    /// Post route, falling back to [`DEFAULT_POST_ID`].
    pub fn post(id: Option<&str>) -> Self {
        let id = id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(DEFAULT_POST_ID);
        Self::PostDetail { id: id.to_string() }
    }

    /// Relative URL with every parameter percent-encoded.
    pub fn to_url(&self) -> String {
        match self {
            Self::Index => "index.html".to_string(),
            Self::Search { query } => format!("search.html?q={}", urlencoding::encode(query)),
            Self::TiebaDetail { name } => {
                format!("tieba-detail.html?name={}", urlencoding::encode(name))
            }
            Self::PostDetail { id } => format!("post-detail.html?id={}", urlencoding::encode(id)),
        }
    }

    /// Decode a URL produced by [`Self::to_url`] (or typed by hand).
    ///
    /// Leading directories are ignored and `+` decodes to a space, as a
    /// browser's query-string parser does.
    pub fn parse(url: &str) -> AppResult<Self> {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let page = path.rsplit('/').next().unwrap_or(path);

        match page {
            "" | "index.html" => Ok(Self::Index),
            "search.html" => Ok(Self::Search {
                query: param(query, "q")?.unwrap_or_default(),
            }),
            "tieba-detail.html" => Ok(Self::TiebaDetail {
                name: param(query, "name")?.unwrap_or_default(),
            }),
            "post-detail.html" => Ok(Self::post(param(query, "id")?.as_deref())),
            _ => Err(AppError::UnknownRoute(url.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url())
    }
}

fn param(query: &str, key: &str) -> AppResult<Option<String>> {
    for pair in query.split('&') {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k == key {
            let v = v.replace('+', " ");
            let decoded =
                urlencoding::decode(&v).map_err(|_| AppError::BadParameter(pair.to_string()))?;
            return Ok(Some(decoded.into_owned()));
        }
    }
    Ok(None)
}

/// Page-specific setup run when a page is entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    TiebaDetail,
    PostDetail,
    Search { query: Option<String> },
    Profile,
    Auth,
}

impl Page {
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Index => Self::Home,
            Route::Search { query } => Self::Search {
                query: Some(query.clone()).filter(|q| !q.is_empty()),
            },
            Route::TiebaDetail { .. } => Self::TiebaDetail,
            Route::PostDetail { .. } => Self::PostDetail,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::TiebaDetail => "tieba-detail",
            Self::PostDetail => "post-detail",
            Self::Search { .. } => "search",
            Self::Profile => "profile",
            Self::Auth => "auth",
        }
    }
}
