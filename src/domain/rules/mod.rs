// Domain rules - File name transformations

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::merge::{self, find_all, window};
use crate::domain::model::*;

/// Pattern used by `delete_regexp` when none is given
pub const DEFAULT_DELETE_PATTERN: &str = r"-\d+[a-z]+";
/// Pattern used by `insert_before` when none is given
pub const DEFAULT_INSERT_PATTERN: &str = r"\d+[a-z]+";

static LONG_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"20\d{6}").unwrap());
static SHORT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{6}").unwrap());

/// Insert `new_part` after the first `skip` parts and append `extension`.
///
/// An empty side does not get a separator.
pub fn concat(
    parts: &[String],
    skip: usize,
    new_part: &str,
    extension: &str,
) -> Result<String, DomainError> {
    if skip > parts.len() {
        return Err(DomainError::SkipOutOfRange(format!(
            "more to skip than parts present. skip: {}, parts: {}",
            skip,
            parts.len()
        )));
    }

    let mut start = parts[..skip].join(SEPARATOR);
    if !start.is_empty() {
        start.push_str(SEPARATOR);
    }

    let mut end = parts[skip..].join(SEPARATOR);
    if !end.is_empty() {
        end.insert_str(0, SEPARATOR);
    }

    Ok(format!("{}{}{}{}", start, new_part, end, extension))
}

/// Insert `new_part` after the first `skip` segments.
pub fn prefix(file_name: &str, skip: usize, new_part: &str) -> Result<String, DomainError> {
    let name = FileName::split(file_name);
    concat(&name.segments, skip, new_part, &name.extension)
}

/// Insert `new_part` before the last `skip` segments.
pub fn suffix(file_name: &str, skip: usize, new_part: &str) -> Result<String, DomainError> {
    let name = FileName::split(file_name);
    let skip_inverse = name.segments.len().checked_sub(skip).ok_or_else(|| {
        DomainError::SkipOutOfRange(format!(
            "more to skip than parts present. file: {:?}, skip: {}, parts: {}",
            name.base,
            skip,
            name.segments.len()
        ))
    })?;

    concat(&name.segments, skip_inverse, new_part, &name.extension)
}

/// Replace the occurrence of `search` that follows the first `skip` ones.
///
/// A base name that does not contain `search` is returned unchanged.
pub fn replace(
    file_name: &str,
    search: &str,
    replace_with: &str,
    skip: usize,
) -> Result<String, DomainError> {
    if search.is_empty() {
        return Err(DomainError::BadArgs("search text is empty".to_string()));
    }

    let name = FileName::split(file_name);
    let chunks: Vec<&str> = name.base.split(search).collect();
    let found = chunks.len() - 1;
    if skip > found {
        return Err(DomainError::SkipOutOfRange(format!(
            "more to skip than found occurrences. file: {:?}, skip: {}, found: {}",
            name.base, skip, found
        )));
    }

    if found == 0 {
        return Ok(name.file_name());
    }

    let start = chunks[..=skip].join(search);
    let end = chunks[skip + 1..].join(search);

    Ok(format!("{}{}{}{}", start, replace_with, end, name.extension))
}

/// Parse a comma separated list of 1-based part indexes, e.g. `1,3`.
pub fn parse_part_list(list: &str) -> Result<Vec<usize>, DomainError> {
    list.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<usize>()
                .map_err(|_| DomainError::ParseFailed(format!("invalid part index: {:?}", item)))
        })
        .collect()
}

/// Drop the segments at the given 1-based positions, counted from the back when `from_back`.
///
/// Positions outside the name are ignored.
pub fn delete_parts(file_name: &str, parts: &[usize], from_back: bool) -> String {
    let name = FileName::split(file_name);
    let len = name.segments.len();

    let doomed: Vec<usize> = parts
        .iter()
        .filter_map(|&p| if from_back { len.checked_sub(p) } else { p.checked_sub(1) })
        .collect();

    let kept: Vec<String> = name
        .segments
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !doomed.contains(i))
        .map(|(_, segment)| segment)
        .collect();

    FileName::join(&kept, &name.extension)
}

/// Remove the selected capture group of every selected match.
///
/// Each removal hits the first textual occurrence in the already shortened base name.
pub fn delete_regexp(
    file_name: &str,
    pattern: Option<&str>,
    group: usize,
    skip_finds: usize,
    max_count: usize,
) -> Result<String, DomainError> {
    let name = FileName::split(file_name);
    let pattern = pattern
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_DELETE_PATTERN);

    let re = Regex::new(pattern)?;
    let finds = find_all(&re, &name.base, group)?;
    debug!(base = %name.base, ?finds, "delete-regexp matches");

    if finds.is_empty() {
        return Err(DomainError::NoMatches(format!(
            "pattern {:?} in {:?}",
            pattern, name.base
        )));
    }

    let mut base = name.base.clone();
    for find in window(finds, skip_finds, max_count)? {
        base = base.replacen(&find.group, "", 1);
    }

    Ok(format!("{}{}", base, name.extension))
}

/// Insert `insert_text` before the last match of `pattern`, or append it when nothing matches.
///
/// The pattern gets a leading dash unless `skip_dash_prefix`. With `skip_duplicate` a file name
/// already containing `insert_text` is left alone.
pub fn insert_before(
    file_name: &str,
    pattern: Option<&str>,
    insert_text: &str,
    skip_dash_prefix: bool,
    skip_duplicate: bool,
) -> Result<String, DomainError> {
    if skip_duplicate && file_name.contains(insert_text) {
        debug!(needle = insert_text, haystack = file_name, "skipping as duplicate is found");
        return Ok(file_name.to_string());
    }

    let name = FileName::split(file_name);
    let pattern = pattern
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_INSERT_PATTERN);
    let pattern = if skip_dash_prefix {
        format!("({})", pattern)
    } else {
        format!("-({})", pattern)
    };

    let re = Regex::new(&pattern)?;
    let last = find_all(&re, &name.base, 1)?.pop();
    debug!(base = %name.base, ?last, "insert-before match");

    let renamed = match last {
        Some(find) => {
            let insert = format!("{}-{}", insert_text, find.group);
            name.base.replacen(&find.group, &insert, 1)
        }
        None => format!("{}-{}", name.base, insert_text),
    };

    Ok(format!("{}{}", renamed, name.extension))
}

/// Human label for a well-known resolution, or the plain `WxH` otherwise.
pub fn dimension_label(dimensions: &Dimensions) -> String {
    let label = match (dimensions.width, dimensions.height) {
        (7680, 4320) => "8k-4320p",
        (3840, 2160) => "4k-2160p",
        (2048, 1080) => "2k-1080p",
        (2560, 1440) => "qhd-1440p",
        (1920, 1080) => "fullhd-1080p",
        (1280, 720) => "hd-720p",
        (960, 540) => "ed-540p",
        (640, 480) => "sd-480p",
        _ => return dimensions.to_string(),
    };
    label.to_string()
}

/// Prefix the name with the single date it contains, formatted `YYYY.MM.DD`.
///
/// `20YYMMDD` is looked for first, `YYMMDD` second.
pub fn date_prefix(file_name: &str) -> Result<String, DomainError> {
    let name = FileName::split(file_name);

    let mut found: Vec<&str> = LONG_DATE.find_iter(&name.base).map(|m| m.as_str()).collect();
    let mut format = "%Y%m%d";
    if found.is_empty() {
        found = SHORT_DATE.find_iter(&name.base).map(|m| m.as_str()).collect();
        format = "%y%m%d";
    }
    debug!(base = %name.base, ?found, "prefix-date matches");

    let date = match found.as_slice() {
        [] => return Err(DomainError::NoMatches(format!("no date in {:?}", name.base))),
        [date] => *date,
        _ => {
            return Err(DomainError::TooManyMatches(format!(
                "{} dates in {:?}",
                found.len(),
                name.base
            )))
        }
    };

    let parsed = NaiveDate::parse_from_str(date, format)
        .map_err(|e| DomainError::ParseFailed(format!("failed to parse date {:?}: {}", date, e)))?;

    Ok(format!(
        "{}-{}{}",
        parsed.format("%Y.%m.%d"),
        name.base,
        name.extension
    ))
}

/// A file name transformation with all of its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOperation {
    Prefix {
        text: String,
        skip_parts: usize,
    },
    Suffix {
        text: String,
        skip_parts: usize,
    },
    Replace {
        search: String,
        replace_with: String,
        skip_finds: usize,
    },
    DeleteParts {
        /// Raw comma separated list, parsed per file
        parts: String,
        from_back: bool,
    },
    DeleteRegexp {
        pattern: Option<String>,
        group: usize,
        skip_finds: usize,
        max_count: usize,
    },
    AddNumber {
        pattern: Option<String>,
        number: i64,
        group: usize,
        skip_finds: usize,
        max_count: usize,
    },
    InsertBefore {
        pattern: Option<String>,
        text: String,
        skip_dash_prefix: bool,
        skip_duplicate: bool,
    },
    /// Resolved into `InsertBefore` once the file is probed
    InsertDimensions {
        pattern: Option<String>,
        skip_dash_prefix: bool,
        skip_duplicate: bool,
    },
    MergeParts {
        pattern: Option<String>,
        delete_text: Option<String>,
    },
    DatePrefix,
}

impl RenameOperation {
    /// Command name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            RenameOperation::Prefix { .. } => "prefix",
            RenameOperation::Suffix { .. } => "suffix",
            RenameOperation::Replace { .. } => "replace",
            RenameOperation::DeleteParts { .. } => "delete-parts",
            RenameOperation::DeleteRegexp { .. } => "delete-regexp",
            RenameOperation::AddNumber { .. } => "add-number",
            RenameOperation::InsertBefore { .. } => "insert-before",
            RenameOperation::InsertDimensions { .. } => "insert-dimensions",
            RenameOperation::MergeParts { .. } => "merge-parts",
            RenameOperation::DatePrefix => "prefix-date",
        }
    }

    /// Whether the file has to be probed before the operation can run
    pub fn needs_probe(&self) -> bool {
        matches!(self, RenameOperation::InsertDimensions { .. })
    }

    /// Turn `InsertDimensions` into the `InsertBefore` it stands for.
    pub fn with_dimensions(&self, dimensions: &Dimensions) -> RenameOperation {
        match self {
            RenameOperation::InsertDimensions {
                pattern,
                skip_dash_prefix,
                skip_duplicate,
            } => RenameOperation::InsertBefore {
                pattern: pattern.clone(),
                text: dimension_label(dimensions),
                skip_dash_prefix: *skip_dash_prefix,
                skip_duplicate: *skip_duplicate,
            },
            other => other.clone(),
        }
    }

    /// Compute the new file name for `file_name` (no directory).
    pub fn apply(&self, file_name: &str) -> Result<String, DomainError> {
        match self {
            RenameOperation::Prefix { text, skip_parts } => prefix(file_name, *skip_parts, text),
            RenameOperation::Suffix { text, skip_parts } => suffix(file_name, *skip_parts, text),
            RenameOperation::Replace {
                search,
                replace_with,
                skip_finds,
            } => replace(file_name, search, replace_with, *skip_finds),
            RenameOperation::DeleteParts { parts, from_back } => {
                let parts = parse_part_list(parts)?;
                Ok(delete_parts(file_name, &parts, *from_back))
            }
            RenameOperation::DeleteRegexp {
                pattern,
                group,
                skip_finds,
                max_count,
            } => delete_regexp(file_name, pattern.as_deref(), *group, *skip_finds, *max_count),
            RenameOperation::AddNumber {
                pattern,
                number,
                group,
                skip_finds,
                max_count,
            } => merge::add_number(
                file_name,
                pattern.as_deref(),
                *number,
                *group,
                *skip_finds,
                *max_count,
            ),
            RenameOperation::InsertBefore {
                pattern,
                text,
                skip_dash_prefix,
                skip_duplicate,
            } => insert_before(
                file_name,
                pattern.as_deref(),
                text,
                *skip_dash_prefix,
                *skip_duplicate,
            ),
            RenameOperation::InsertDimensions { .. } => Err(DomainError::BadArgs(
                "insert-dimensions needs the probed dimensions".to_string(),
            )),
            RenameOperation::MergeParts {
                pattern,
                delete_text,
            } => merge::merge_parts(file_name, pattern.as_deref(), delete_text.as_deref()),
            RenameOperation::DatePrefix => date_prefix(file_name),
        }
    }
}
