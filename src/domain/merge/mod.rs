//! Description arithmetic.
//!
//! A description is a dash-prefixed optional number plus label, e.g. `-13ffc`. This module sums
//! chained descriptions (`merge_parts`) and increments their numbers (`add_number`).

use regex::Regex;
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::FileName;

/// Pattern used by `add_number` when none is given
pub const DEFAULT_ADD_PATTERN: &str = r"-(\d+)[a-z]+";
/// Fragment used by `merge_parts` when none is given
pub const DEFAULT_MERGE_FRAGMENT: &str = "([a-z]+)";

/// One regex match: the whole match and the selected capture group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Find {
    pub whole: String,
    pub group: String,
}

/// Collect every non-overlapping match of `re` in `haystack`.
///
/// Fails when `group` does not exist in the pattern. A group that exists but did not
/// participate in a match yields an empty string.
pub(crate) fn find_all(re: &Regex, haystack: &str, group: usize) -> Result<Vec<Find>, DomainError> {
    if group >= re.captures_len() {
        return Err(DomainError::BadArgs(format!(
            "regexp group {} does not exist in {:?}",
            group,
            re.as_str()
        )));
    }

    Ok(re
        .captures_iter(haystack)
        .map(|caps| Find {
            whole: caps.get(0).map(|m| m.as_str().to_string()).unwrap_or_default(),
            group: caps
                .get(group)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
        .collect())
}

/// Skip the first `skip_finds` matches and keep at most `max_count` of the rest (0 keeps all).
pub(crate) fn window<T>(
    finds: Vec<T>,
    skip_finds: usize,
    max_count: usize,
) -> Result<Vec<T>, DomainError> {
    if skip_finds > finds.len() {
        return Err(DomainError::SkipOutOfRange(format!(
            "skip: {}, found: {}",
            skip_finds,
            finds.len()
        )));
    }

    let take = if max_count == 0 { usize::MAX } else { max_count };
    Ok(finds.into_iter().skip(skip_finds).take(take).collect())
}

/// Add `number_to_add` to the number of selected descriptions.
///
/// Without a pattern `-(\d+)[a-z]+` is used with group 1. For each selected match the first
/// textual occurrence of the old number inside the match is replaced, then the first textual
/// occurrence of the match inside the base name is replaced.
pub fn add_number(
    file_name: &str,
    pattern: Option<&str>,
    number_to_add: i64,
    group: usize,
    skip_finds: usize,
    max_count: usize,
) -> Result<String, DomainError> {
    let name = FileName::split(file_name);
    let (pattern, group) = match pattern.filter(|p| !p.is_empty()) {
        Some(p) => (p, group),
        None => (DEFAULT_ADD_PATTERN, 1),
    };

    let re = Regex::new(pattern)?;
    let finds = find_all(&re, &name.base, group)?;
    debug!(base = %name.base, ?finds, "add-number matches");

    if finds.is_empty() {
        return Err(DomainError::NoMatches(format!(
            "pattern {:?} in {:?}",
            pattern, name.base
        )));
    }

    let mut base = name.base.clone();
    for find in window(finds, skip_finds, max_count)? {
        let found: i64 = find.group.parse().map_err(|_| {
            DomainError::ParseFailed(format!("not a number: {:?}", find.group))
        })?;
        let added = found.checked_add(number_to_add).ok_or_else(|| {
            DomainError::BadArgs(format!("{} + {} overflows", found, number_to_add))
        })?;

        let replace_with = find
            .whole
            .replacen(&found.to_string(), &added.to_string(), 1);
        base = base.replacen(&find.whole, &replace_with, 1);
    }

    Ok(format!("{}{}", base, name.extension))
}

/// Wrap a user supplied label fragment into a single capture group.
///
/// A fragment that is already grouped is kept, one that loses more than a single pair of
/// parentheses when stripped is rejected.
fn label_fragment(pattern: Option<&str>) -> Result<String, DomainError> {
    let pattern = match pattern.filter(|p| !p.is_empty()) {
        Some(p) => p,
        None => return Ok(DEFAULT_MERGE_FRAGMENT.to_string()),
    };

    let stripped = pattern.replace(['(', ')'], "");
    if stripped.len() + 2 < pattern.len() {
        return Err(DomainError::InvalidPattern(
            "wrong regular expression received".to_string(),
        ));
    }
    if stripped.len() == pattern.len() {
        return Ok(format!("({})", pattern));
    }

    Ok(pattern.to_string())
}

/// Merge chained descriptions into one, summing their numbers.
///
/// `foo-1bar-2baz.txt` becomes `foo-3bar-baz.txt`. Matches are consumed right to left, each one
/// trimmed off the end of the base name. When nothing matches the name is returned unchanged.
/// `delete_text` is removed once from the result.
pub fn merge_parts(
    file_name: &str,
    pattern: Option<&str>,
    delete_text: Option<&str>,
) -> Result<String, DomainError> {
    let name = FileName::split(file_name);
    let fragment = label_fragment(pattern)?;

    let re = Regex::new(&format!(r"-(\d{{1,2}})({}(-[a-z]+\d*)*)", fragment))?;
    let matches: Vec<(String, String, String)> = re
        .captures_iter(&name.base)
        .map(|caps| {
            let get = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();
            (get(0), get(1), get(2))
        })
        .collect();

    if matches.is_empty() {
        debug!(base = %name.base, "merge-parts found no descriptions");
        return Ok(name.file_name());
    }

    let mut base = name.base.as_str();
    let mut sum: i64 = 0;
    let mut extra = vec![String::new(); matches.len()];
    for (i, (whole, number, label)) in matches.iter().enumerate().rev() {
        base = base
            .len()
            .checked_sub(whole.len())
            .and_then(|end| base.get(..end))
            .ok_or_else(|| {
                DomainError::BadArgs(format!("cannot trim {:?} off {:?}", whole, base))
            })?;

        let n: i64 = number
            .parse()
            .map_err(|_| DomainError::ParseFailed(format!("not a number: {:?}", number)))?;
        sum += n;
        extra[i] = label.clone();

        debug!(base, ?extra, sum, "merge-parts step");
    }

    let mut merged = format!("{}-{}{}{}", base, sum, extra.join("-"), name.extension);
    if let Some(text) = delete_text.filter(|t| !t.is_empty()) {
        merged = merged.replacen(text, "", 1);
    }

    Ok(merged)
}
