//! Search control point parsing.
//!
//! A search is a concatenation of Search Control Items, each laid out as
//! `len:u8, type:u8, param:[u8; len - 1]`. The length counts the type byte.
//! Parsing stops at the first malformed item; nothing after it is looked at.

use core::fmt;

use platform::config::SEARCH_LEN_MAX;

/// Smallest valid item length (the type byte alone).
pub const SCI_LEN_MIN: u8 = 1;

/// What a search item matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SearchType {
    TrackName = 1,
    ArtistName = 2,
    AlbumName = 3,
    GroupName = 4,
    EarliestYear = 5,
    LatestYear = 6,
    Genre = 7,
    OnlyTracks = 8,
    OnlyGroups = 9,
}

impl SearchType {
    /// Raw wire value.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SearchType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => SearchType::TrackName,
            2 => SearchType::ArtistName,
            3 => SearchType::AlbumName,
            4 => SearchType::GroupName,
            5 => SearchType::EarliestYear,
            6 => SearchType::LatestYear,
            7 => SearchType::Genre,
            8 => SearchType::OnlyTracks,
            9 => SearchType::OnlyGroups,
            other => return Err(other),
        })
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchType::TrackName => "track name",
            SearchType::ArtistName => "artist name",
            SearchType::AlbumName => "album name",
            SearchType::GroupName => "group name",
            SearchType::EarliestYear => "earliest year",
            SearchType::LatestYear => "latest year",
            SearchType::Genre => "genre",
            SearchType::OnlyTracks => "only tracks",
            SearchType::OnlyGroups => "only groups",
        })
    }
}

/// Why a search was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SearchError {
    /// The whole search is longer than the control point allows.
    #[error("search too long ({0} octets)")]
    TooLong(usize),
    /// An item length field below the minimum.
    #[error("search item length too small")]
    LengthTooSmall,
    /// An item claims more bytes than remain.
    #[error("incomplete search control item")]
    Incomplete,
    /// An item type outside the known range.
    #[error("invalid search type {0}")]
    InvalidType(u8),
}

/// One well-formed search control item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchItem<'a> {
    /// Field the item matches against.
    pub search_type: SearchType,
    /// Raw parameter bytes, possibly empty.
    pub param: &'a [u8],
}

/// Iterator over the items of a search. Yields at most one error, after
/// which it is exhausted.
#[derive(Debug, Clone)]
pub struct SearchItems<'a> {
    rest: &'a [u8],
    failed: bool,
}

impl<'a> Iterator for SearchItems<'a> {
    type Item = Result<SearchItem<'a>, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (&len, after_len) = self.rest.split_first()?;
        let item = parse_item(len, after_len);
        match item {
            Ok((found, rest)) => {
                self.rest = rest;
                Some(Ok(found))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

fn parse_item(len: u8, after_len: &[u8]) -> Result<(SearchItem<'_>, &[u8]), SearchError> {
    if len < SCI_LEN_MIN {
        return Err(SearchError::LengthTooSmall);
    }
    if usize::from(len) > after_len.len() {
        return Err(SearchError::Incomplete);
    }
    let (body, rest) = after_len.split_at(usize::from(len));
    let (&raw_type, param) = body.split_first().ok_or(SearchError::Incomplete)?;
    let search_type = SearchType::try_from(raw_type).map_err(SearchError::InvalidType)?;
    Ok((SearchItem { search_type, param }, rest))
}

/// Iterate the items of `search` without checking its total length.
#[must_use]
pub fn items(search: &[u8]) -> SearchItems<'_> {
    SearchItems {
        rest: search,
        failed: false,
    }
}

/// Validate a complete search and return the number of items in it.
///
/// An empty search is valid and has no items.
pub fn validate(search: &[u8]) -> Result<usize, SearchError> {
    if search.len() > SEARCH_LEN_MAX {
        warn!("search too long ({} octets)", search.len());
        return Err(SearchError::TooLong(search.len()));
    }
    debug!("parsing {} octet search", search.len());
    let mut count: usize = 0;
    for item in items(search) {
        let item = match item {
            Ok(item) => item,
            Err(e) => {
                warn!("malformed search control item after {} items", count);
                return Err(e);
            }
        };
        debug!(
            "search item {}: {}, {} octets",
            count,
            item.search_type,
            item.param.len()
        );
        count = count.saturating_add(1);
    }
    Ok(count)
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_search_is_valid() {
        assert_eq!(validate(&[]), Ok(0));
    }

    #[test]
    fn test_two_items() {
        // track name "ab", then only-tracks with no parameter
        let search = [3, 1, b'a', b'b', 1, 8];
        assert_eq!(validate(&search), Ok(2));
        let parsed: std::vec::Vec<_> = items(&search).map(|i| i.expect("valid")).collect();
        assert_eq!(parsed[0].search_type, SearchType::TrackName);
        assert_eq!(parsed[0].param, b"ab");
        assert_eq!(parsed[1].search_type, SearchType::OnlyTracks);
        assert!(parsed[1].param.is_empty());
    }

    #[test]
    fn test_zero_length_item_rejected() {
        assert_eq!(validate(&[0, 1]), Err(SearchError::LengthTooSmall));
    }

    #[test]
    fn test_item_past_end_rejected() {
        assert_eq!(validate(&[4, 1, b'a']), Err(SearchError::Incomplete));
        assert_eq!(validate(&[1]), Err(SearchError::Incomplete));
    }

    #[test]
    fn test_type_out_of_range_rejected() {
        assert_eq!(validate(&[1, 0]), Err(SearchError::InvalidType(0)));
        assert_eq!(validate(&[1, 10]), Err(SearchError::InvalidType(10)));
    }

    #[test]
    fn test_too_long_search_rejected_before_parsing() {
        let search = [1u8; SEARCH_LEN_MAX + 1];
        assert_eq!(validate(&search), Err(SearchError::TooLong(SEARCH_LEN_MAX + 1)));
        assert_eq!(validate(&search[..SEARCH_LEN_MAX]), Ok(SEARCH_LEN_MAX / 2));
    }

    #[test]
    fn test_parsing_stops_at_first_error() {
        let search = [1, 1, 0, 1, 2];
        let mut it = items(&search);
        assert!(matches!(it.next(), Some(Ok(_))));
        assert_eq!(it.next(), Some(Err(SearchError::LengthTooSmall)));
        assert_eq!(it.next(), None);
    }
}
