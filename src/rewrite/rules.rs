//! Rewrite rule table.
//!
//! # Rules (first match wins)
//! ```text
//! 1. root           /<Archive>                  → redirect /<Archive>/
//!                   /<Archive>/                 → redirect /<Archive>/documentation
//! 2. asset file     /<Archive>/data/documentation.json
//!                                               → serve /data/documentation/<reference>.json
//!                   /<Archive>/favicon.ico, favicon.svg, theme-settings.json
//!                                               → serve verbatim
//! 3. asset folder   /<Archive>/{css,data,downloads,images,img,index,js,videos}/…
//!                                               → serve verbatim
//! 4. docs folder    /<Archive>/documentation/   → serve /documentation/<reference>/index.html
//!                   /<Archive>/tutorials/       → serve /tutorials/<reference>/index.html
//!                   otherwise                   → redirect with trailing slash
//! ```
//!
//! Matching is by prefix of the relative path, not by path segment:
//! `/documentation-extra` is handled by the documentation folder rule.

use crate::rewrite::resource::Resource;

/// Relative paths naming the archive itself.
pub const ROOT_PATHS: &[&str] = &["", "/"];

/// Asset file served from a per-archive location.
pub const DOCUMENTATION_JSON: &str = "/data/documentation.json";

/// Asset files at the top of the archive.
pub const ASSET_FILES: &[&str] = &[
    DOCUMENTATION_JSON,
    "/favicon.ico",
    "/favicon.svg",
    "/theme-settings.json",
];

/// Asset folders forwarded verbatim into the archive.
pub const ASSET_FOLDERS: &[&str] = &[
    "/css/",
    "/data/",
    "/downloads/",
    "/images/",
    "/img/",
    "/index/",
    "/js/",
    "/videos/",
];

/// Folders whose index page is generated per archive.
pub const DOCUMENTATION_FOLDERS: &[&str] = &["/documentation", "/tutorials"];

/// Outcome of rule dispatch for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Permanently redirect the client to `to`.
    Redirect { to: String },
    /// Serve `relative` from inside the archive bundle at `archive_path`.
    Serve {
        relative: String,
        archive_path: String,
    },
    /// Not a documentation request: hand over to the next handler.
    NoMatch,
}

impl Action {
    /// Physical lookup key for [`Action::Serve`].
    pub fn resource_path(&self) -> Option<String> {
        match self {
            Action::Serve {
                relative,
                archive_path,
            } => Some(format!("{archive_path}{relative}")),
            _ => None,
        }
    }

    fn serve(relative: impl Into<String>, resource: &Resource) -> Self {
        Action::Serve {
            relative: relative.into(),
            archive_path: resource.archive_path(),
        }
    }
}

/// A named rule: returns an action when it matches.
struct Rule {
    name: &'static str,
    apply: fn(&Resource, &str) -> Option<Action>,
}

const RULES: [Rule; 4] = [
    Rule {
        name: "root",
        apply: root_rule,
    },
    Rule {
        name: "asset_file",
        apply: asset_file_rule,
    },
    Rule {
        name: "asset_folder",
        apply: asset_folder_rule,
    },
    Rule {
        name: "documentation_folder",
        apply: documentation_folder_rule,
    },
];

/// Classify a resource against the rule table.
///
/// `original_path` is the decoded request path, used to build redirects.
pub fn dispatch(resource: &Resource, original_path: &str) -> Action {
    RULES
        .iter()
        .find_map(|rule| {
            let action = (rule.apply)(resource, original_path)?;
            tracing::trace!(rule = rule.name, ?action, "Rewrite rule matched");
            Some(action)
        })
        .unwrap_or(Action::NoMatch)
}

fn root_rule(resource: &Resource, original_path: &str) -> Option<Action> {
    if !ROOT_PATHS.contains(&resource.relative_path()) {
        return None;
    }

    let to = if original_path.ends_with('/') {
        format!("{original_path}documentation")
    } else {
        format!("{original_path}/")
    };
    Some(Action::Redirect { to })
}

fn asset_file_rule(resource: &Resource, _original_path: &str) -> Option<Action> {
    let asset_file = ASSET_FILES
        .iter()
        .find(|file| resource.relative_path().starts_with(*file))?;

    let relative = if *asset_file == DOCUMENTATION_JSON {
        format!("/data/documentation/{}.json", resource.archive_reference())
    } else {
        resource.relative_path().to_string()
    };
    Some(Action::serve(relative, resource))
}

fn asset_folder_rule(resource: &Resource, _original_path: &str) -> Option<Action> {
    ASSET_FOLDERS
        .iter()
        .any(|folder| resource.relative_path().starts_with(folder))
        .then(|| Action::serve(resource.relative_path(), resource))
}

fn documentation_folder_rule(resource: &Resource, original_path: &str) -> Option<Action> {
    let folder = DOCUMENTATION_FOLDERS
        .iter()
        .find(|folder| resource.relative_path().starts_with(*folder))?;

    if original_path.ends_with(&format!("{folder}/")) {
        let index = format!("{folder}/{}/index.html", resource.archive_reference());
        Some(Action::serve(index, resource))
    } else {
        Some(Action::Redirect {
            to: format!("{original_path}/"),
        })
    }
}
