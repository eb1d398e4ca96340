//! Jira issue key extraction from pull request titles and branch names.

use regex::Regex;

use crate::error::Result;

/// Generic issue key pattern used on pull request titles.
const TITLE_KEY_PATTERN: &str = r"[A-Z]+-\d+";

/// Extract every issue key from the part of a title before the first `:`.
///
/// `"ABC-1 ABC-2: Fix it"` yields `["ABC-1", "ABC-2"]`. A title without a
/// colon is scanned in full.
pub fn issue_keys_in_title(title: &str) -> Result<Vec<String>> {
    let regex = Regex::new(TITLE_KEY_PATTERN)?;
    let prefix = title.split(':').next().unwrap_or_default();

    Ok(regex
        .find_iter(prefix)
        .map(|m| m.as_str().to_string())
        .collect())
}

/// Matcher for `KEY-1+KEY-2` style key groups of a single project.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    regex: Regex,
}

impl KeyPattern {
    /// Build the matcher for a project key such as `"ABC"`.
    pub fn new(project_key: &str) -> Result<Self> {
        let key = regex::escape(project_key);
        let regex = Regex::new(&format!(r"({key}-\d+)(\+{key}-\d+)*"))?;
        Ok(Self { regex })
    }

    /// Keys from the first group in a branch name.
    pub fn branch_keys(&self, branch: &str) -> Vec<String> {
        self.regex
            .find(branch)
            .map(|m| split_group(m.as_str()))
            .unwrap_or_default()
    }

    /// Keys from every group in a title.
    pub fn title_keys(&self, title: &str) -> Vec<String> {
        self.regex
            .find_iter(title)
            .flat_map(|m| split_group(m.as_str()))
            .collect()
    }
}

fn split_group(group: &str) -> Vec<String> {
    group.split('+').map(str::to_string).collect()
}

/// Extract the issue keys encoded in a branch name.
///
/// `feature/ABC-12+ABC-13-login` yields `["ABC-12", "ABC-13"]`.
pub fn branch_issue_keys(branch: &str, project_key: &str) -> Result<Vec<String>> {
    Ok(KeyPattern::new(project_key)?.branch_keys(branch))
}

/// How a pull request title relates to the branch's issue keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleCheck {
    /// The title carries exactly the branch keys
    Matches(Vec<String>),
    /// The title carries keys, but not the branch keys
    OtherKeys(Vec<String>),
    /// The title carries no keys of the project
    Missing,
}

impl TitleCheck {
    /// Value of the `pr_title_starts_with_issue_key` output.
    pub fn starts_with_issue_key(&self) -> bool {
        matches!(self, TitleCheck::Matches(_))
    }

    /// Value of the `pr_title_starts_with_other_issue_key` output, if set.
    pub fn starts_with_other_issue_key(&self) -> Option<bool> {
        match self {
            TitleCheck::OtherKeys(_) => Some(true),
            _ => None,
        }
    }
}

/// Compare the keys in a pull request title against the branch keys.
pub fn check_title(branch_keys: &[String], title: &str, project_key: &str) -> Result<TitleCheck> {
    let title_keys = KeyPattern::new(project_key)?.title_keys(title);

    if title_keys.is_empty() {
        return Ok(TitleCheck::Missing);
    }

    let exact = title_keys.len() == branch_keys.len()
        && title_keys.iter().all(|key| branch_keys.contains(key));

    Ok(if exact {
        TitleCheck::Matches(title_keys)
    } else {
        TitleCheck::OtherKeys(title_keys)
    })
}

/// Format keys for display: `ABC-1` or `[ABC-1, ABC-2]`.
pub fn format_keys(keys: &[String]) -> String {
    match keys {
        [single] => single.clone(),
        _ => format!("[{}]", keys.join(", ")),
    }
}
