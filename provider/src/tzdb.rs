//! `ZoneRulesProvider` implementations backed by TZif data.
//!
//! [`TzdbProvider`] reads the TZif files bundled in `jiff-tzdb`, so it
//! works without any system time zone database. [`FsTzdbProvider`] reads
//! a zoneinfo directory such as `/usr/share/zoneinfo`.
//!
//! Both parse a zone lazily on first use and cache it for the lifetime of
//! the provider.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use std::path::{Component, Path, PathBuf};

use crate::{
    provider::{
        TimeZoneTransitionInfo, TransitionDirection, ZoneProviderResult, ZoneRulesProvider,
        ZoneTransition,
    },
    tzif::Tzif,
    ZoneProviderError,
};

const ZONEINFO_DIR: &str = "/usr/share/zoneinfo/";

/// A lazily filled map from canonical identifier to parsed TZif data.
#[derive(Debug, Default)]
struct TzifCache {
    cache: RefCell<BTreeMap<String, Tzif>>,
}

impl TzifCache {
    fn with_tzif<R>(
        &self,
        identifier: &str,
        load: impl FnOnce() -> ZoneProviderResult<Tzif>,
        f: impl FnOnce(&Tzif) -> R,
    ) -> ZoneProviderResult<R> {
        if let Some(tzif) = self.cache.borrow().get(identifier) {
            #[cfg(feature = "log")]
            log::trace!("TZif cache hit for {identifier}");
            return Ok(f(tzif));
        }

        let tzif = load()?;
        #[cfg(feature = "log")]
        log::debug!("loaded TZif data for {identifier}");
        let result = f(&tzif);
        self.cache.borrow_mut().insert(identifier.into(), tzif);
        Ok(result)
    }
}

/// A provider using the time zone database compiled into `jiff-tzdb`.
#[derive(Debug, Default)]
pub struct TzdbProvider {
    cache: TzifCache,
}

impl TzdbProvider {
    fn with_tzif<R>(
        &self,
        identifier: &str,
        f: impl FnOnce(&Tzif) -> R,
    ) -> ZoneProviderResult<R> {
        let Some((canonical, data)) = jiff_tzdb::get(identifier) else {
            return Err(ZoneProviderError::UnknownIdentifier(identifier.into()));
        };
        self.cache
            .with_tzif(canonical, || Tzif::from_bytes(data), f)
    }
}

impl ZoneRulesProvider for TzdbProvider {
    fn normalize_identifier(&self, identifier: &str) -> ZoneProviderResult<String> {
        jiff_tzdb::get(identifier)
            .map(|(canonical, _)| canonical.into())
            .ok_or_else(|| ZoneProviderError::UnknownIdentifier(identifier.into()))
    }

    fn available_identifiers(&self) -> ZoneProviderResult<Vec<String>> {
        Ok(jiff_tzdb::available().map(String::from).collect())
    }

    fn offset_for_epoch_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> ZoneProviderResult<TimeZoneTransitionInfo> {
        self.with_tzif(identifier, |tzif| tzif.offset_at(epoch_seconds))
    }

    fn transition(
        &self,
        identifier: &str,
        epoch_seconds: i64,
        direction: TransitionDirection,
    ) -> ZoneProviderResult<Option<ZoneTransition>> {
        self.with_tzif(identifier, |tzif| tzif.transition(epoch_seconds, direction))
    }
}

/// A provider reading TZif files from a zoneinfo directory.
#[derive(Debug)]
pub struct FsTzdbProvider {
    directory: PathBuf,
    cache: TzifCache,
}

impl Default for FsTzdbProvider {
    fn default() -> Self {
        Self::new(PathBuf::from(ZONEINFO_DIR))
    }
}

impl FsTzdbProvider {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            cache: TzifCache::default(),
        }
    }

    /// Maps an identifier onto a file below the zoneinfo directory.
    ///
    /// Identifiers are relative paths made of normal components only.
    fn path_for(&self, identifier: &str) -> ZoneProviderResult<PathBuf> {
        let relative = Path::new(identifier);
        let is_plain = !identifier.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        let path = self.directory.join(relative);
        if !is_plain || !path.is_file() {
            return Err(ZoneProviderError::UnknownIdentifier(identifier.into()));
        }
        Ok(path)
    }

    fn with_tzif<R>(
        &self,
        identifier: &str,
        f: impl FnOnce(&Tzif) -> R,
    ) -> ZoneProviderResult<R> {
        let path = self.path_for(identifier)?;
        self.cache.with_tzif(identifier, || Tzif::from_path(&path), f)
    }

    fn collect_identifiers(
        &self,
        directory: &Path,
        identifiers: &mut Vec<String>,
    ) -> ZoneProviderResult<()> {
        let entries = std::fs::read_dir(directory)
            .map_err(|e| ZoneProviderError::InvalidData(e.to_string()))?;
        for entry in entries {
            let path = entry
                .map_err(|e| ZoneProviderError::InvalidData(e.to_string()))?
                .path();
            if path.is_dir() {
                self.collect_identifiers(&path, identifiers)?;
            } else if is_tzif_file(&path) {
                if let Some(id) = path
                    .strip_prefix(&self.directory)
                    .ok()
                    .and_then(|p| p.to_str())
                {
                    identifiers.push(id.to_string());
                }
            }
        }
        Ok(())
    }
}

fn is_tzif_file(path: &Path) -> bool {
    use std::io::Read;
    let mut magic = [0u8; 4];
    std::fs::File::open(path)
        .and_then(|mut file| file.read_exact(&mut magic))
        .is_ok_and(|()| &magic == b"TZif")
}

impl ZoneRulesProvider for FsTzdbProvider {
    fn normalize_identifier(&self, identifier: &str) -> ZoneProviderResult<String> {
        self.path_for(identifier)?;
        Ok(identifier.into())
    }

    fn available_identifiers(&self) -> ZoneProviderResult<Vec<String>> {
        let mut identifiers = Vec::new();
        self.collect_identifiers(&self.directory, &mut identifiers)?;
        identifiers.sort();
        Ok(identifiers)
    }

    fn offset_for_epoch_seconds(
        &self,
        identifier: &str,
        epoch_seconds: i64,
    ) -> ZoneProviderResult<TimeZoneTransitionInfo> {
        self.with_tzif(identifier, |tzif| tzif.offset_at(epoch_seconds))
    }

    fn transition(
        &self,
        identifier: &str,
        epoch_seconds: i64,
        direction: TransitionDirection,
    ) -> ZoneProviderResult<Option<ZoneTransition>> {
        self.with_tzif(identifier, |tzif| tzif.transition(epoch_seconds, direction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{GapEntryOffsets, LocalTimeRecordResult, UtcOffsetSeconds};
    use crate::utils;

    fn date_time_to_seconds(date: (i32, u8, u8), time: (u8, u8, u8)) -> i64 {
        let time_in_seconds = i64::from(time.0) * 3600 + i64::from(time.1) * 60 + i64::from(time.2);
        let epoch_days = utils::epoch_days_from_gregorian_date(date.0, date.1, date.2);
        time_in_seconds + (epoch_days * 86_400)
    }

    #[test]
    fn identifiers() {
        let provider = TzdbProvider::default();
        assert_eq!(
            provider.normalize_identifier("america/new_york").unwrap(),
            "America/New_York"
        );
        assert!(matches!(
            provider.normalize_identifier("Mars/Olympus_Mons"),
            Err(ZoneProviderError::UnknownIdentifier(_))
        ));
        let available = provider.available_identifiers().unwrap();
        assert!(available.iter().any(|id| id == "Europe/Paris"));
    }

    #[test]
    fn exactly_transition_time_after_empty_edge_case() {
        let provider = TzdbProvider::default();
        let today = date_time_to_seconds((2017, 3, 12), (3, 0, 0));

        let local = provider
            .local_time_records("America/New_York", today)
            .unwrap();
        assert_eq!(local, LocalTimeRecordResult::Single(UtcOffsetSeconds(-14400)));
    }

    #[test]
    fn one_second_before_empty_edge_case() {
        let provider = TzdbProvider::default();
        let today = date_time_to_seconds((2017, 3, 12), (2, 59, 59));

        let local = provider
            .local_time_records("America/New_York", today)
            .unwrap();
        assert_eq!(
            local,
            LocalTimeRecordResult::Empty(GapEntryOffsets {
                offset_before: UtcOffsetSeconds(-18000),
                offset_after: UtcOffsetSeconds(-14400),
            })
        );
    }

    #[test]
    fn sydney_empty_test_case() {
        // Australia Daylight savings day
        let provider = TzdbProvider::default();
        let seconds = date_time_to_seconds((2017, 10, 1), (2, 30, 0));

        let local = provider
            .local_time_records("Australia/Sydney", seconds)
            .unwrap();
        assert!(matches!(local, LocalTimeRecordResult::Empty(_)));
    }

    #[test]
    fn new_york_duplicate_case() {
        let provider = TzdbProvider::default();
        let seconds = date_time_to_seconds((2017, 11, 5), (1, 30, 0));

        let local = provider
            .local_time_records("America/New_York", seconds)
            .unwrap();
        assert_eq!(
            local,
            LocalTimeRecordResult::Ambiguous {
                first: UtcOffsetSeconds(-14400),
                second: UtcOffsetSeconds(-18000),
            }
        );
    }

    #[test]
    fn sydney_duplicate_case() {
        let provider = TzdbProvider::default();
        let seconds = date_time_to_seconds((2017, 4, 2), (2, 30, 0));

        let local = provider
            .local_time_records("Australia/Sydney", seconds)
            .unwrap();
        assert_eq!(
            local,
            LocalTimeRecordResult::Ambiguous {
                first: UtcOffsetSeconds(39600),
                second: UtcOffsetSeconds(36000),
            }
        );
    }

    #[test]
    fn before_epoch_southern_hemisphere() {
        let provider = TzdbProvider::default();
        let seconds = date_time_to_seconds((1880, 4, 2), (2, 30, 0));
        let local = provider
            .local_time_records("Australia/Sydney", seconds)
            .unwrap();
        assert!(matches!(local, LocalTimeRecordResult::Single(_)));
    }

    #[test]
    fn fs_provider_rejects_paths() {
        let provider = FsTzdbProvider::default();
        assert!(provider.normalize_identifier("../etc/passwd").is_err());
        assert!(provider.normalize_identifier("/etc/passwd").is_err());
        assert!(provider.normalize_identifier("").is_err());
    }
}
