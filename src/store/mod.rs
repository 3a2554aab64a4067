//! 로컬 키-값 저장소
//!
//! 컬렉션(`users`, `auctions`, `watchlist`, `loggedInUser`)을 JSON 텍스트로
//! 저장한다. 값이 손상되어 있으면 기본값으로 대체하고 경고만 남긴다.

// region:    --- Imports
use crate::error::StoreError;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod seed;
// endregion: --- Imports

// region:    --- Keys
pub const AUCTIONS_KEY: &str = "auctions";
pub const USERS_KEY: &str = "users";
pub const WATCHLIST_KEY: &str = "watchlist";
pub const LOGGED_IN_USER_KEY: &str = "loggedInUser";
// endregion: --- Keys

// region:    --- Key-Value Store Trait
/// 문자열 키와 JSON 텍스트 값을 보관하는 저장소
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError>;
}

/// 메모리 저장소. 복제본끼리 같은 데이터를 공유한다.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_owned(), value);
        Ok(())
    }
}

/// JSON 파일 저장소
///
/// 파일 전체가 하나의 JSON 객체(키 -> JSON 텍스트)이며, 값을 쓸 때마다
/// 임시 파일에 기록한 뒤 교체한다.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// 파일 저장소 열기. 파일이 없으면 빈 저장소로 시작한다.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "{:<12} --> 손상된 저장소 파일, 빈 저장소로 시작: {} ({})",
                        "Store",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        info!("{:<12} --> 저장소 파일 열기: {}", "Store", path.display());
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    /// 파일 기록이 성공한 경우에만 메모리에 반영된다.
    fn set_item(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.write();
        let mut updated = entries.clone();
        updated.insert(key.to_owned(), value);
        self.flush(&updated)?;
        *entries = updated;
        Ok(())
    }
}
// endregion: --- Key-Value Store Trait

// region:    --- Local Store
/// 타입이 있는 컬렉션 단위로 키-값 저장소를 다루는 래퍼
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// 키의 값 읽기. 값이 없거나 해석할 수 없으면 `default`를 돌려준다.
    pub fn get_data<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                warn!("{:<12} --> 읽기 오류 key={}: {}", "Store", key, e);
                return default;
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!("{:<12} --> 손상된 값 key={}: {}", "Store", key, e);
                default
            }
        }
    }

    /// 키에 값 쓰기
    pub fn set_data<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        debug!("{:<12} --> 쓰기 key={} ({} bytes)", "Store", key, raw.len());
        self.backend.set_item(key, raw)
    }

    /// 값이 존재하는지 확인
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.backend.get_item(key)?.is_some())
    }

    /// 비어 있는 컬렉션에 초기 데이터 채우기
    pub fn initialize(&self) -> Result<(), StoreError> {
        if !self.contains(AUCTIONS_KEY)? {
            self.set_data(AUCTIONS_KEY, &seed::initial_auctions())?;
            info!("{:<12} --> 초기 경매 데이터 저장", "Store");
        }
        if !self.contains(USERS_KEY)? {
            self.set_data(USERS_KEY, &seed::initial_users())?;
            info!("{:<12} --> 초기 사용자 데이터 저장", "Store");
        }
        if !self.contains(WATCHLIST_KEY)? {
            self.set_data::<[i64]>(WATCHLIST_KEY, &[])?;
        }
        Ok(())
    }
}
// endregion: --- Local Store

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::{Auction, User};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "auction-marketplace-{}-{}-{}.json",
            name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn initialize_seeds_only_missing_keys() {
        let store = LocalStore::in_memory();
        store.set_data::<[i64]>(WATCHLIST_KEY, &[42]).unwrap();
        store.initialize().unwrap();

        let auctions: Vec<Auction> = store.get_data(AUCTIONS_KEY, Vec::new());
        let users: Vec<User> = store.get_data(USERS_KEY, Vec::new());
        let watchlist: Vec<i64> = store.get_data(WATCHLIST_KEY, Vec::new());

        assert_eq!(auctions.len(), 1);
        assert_eq!(users.len(), 1);
        assert_eq!(watchlist, vec![42]);
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        let backend = MemoryStore::new();
        backend
            .set_item(AUCTIONS_KEY, "{not json".to_string())
            .unwrap();
        let store = LocalStore::new(backend);

        let auctions: Vec<Auction> = store.get_data(AUCTIONS_KEY, Vec::new());
        assert!(auctions.is_empty());
    }

    #[test]
    fn null_value_reads_as_default() {
        let store = LocalStore::in_memory();
        store
            .set_data::<Option<User>>(LOGGED_IN_USER_KEY, &None)
            .unwrap();

        let user: Option<User> = store.get_data(LOGGED_IN_USER_KEY, None);
        assert!(user.is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        {
            let store = LocalStore::new(FileStore::open(&path).unwrap());
            store.initialize().unwrap();
            store.set_data::<[i64]>(WATCHLIST_KEY, &[1, 2]).unwrap();
        }

        let reopened = LocalStore::new(FileStore::open(&path).unwrap());
        let watchlist: Vec<i64> = reopened.get_data(WATCHLIST_KEY, Vec::new());
        let auctions: Vec<Auction> = reopened.get_data(AUCTIONS_KEY, Vec::new());
        assert_eq!(watchlist, vec![1, 2]);
        assert_eq!(auctions, seed::initial_auctions());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn failed_flush_keeps_previous_value() {
        let dir = temp_path("gone");
        std::fs::create_dir(&dir).unwrap();
        let store = FileStore::open(dir.join("store.json")).unwrap();
        store.set_item(WATCHLIST_KEY, "[1]".to_string()).unwrap();

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(
            store.set_item(WATCHLIST_KEY, "[1,2]".to_string()),
            Err(StoreError::Io(_))
        ));
        assert_eq!(store.get_item(WATCHLIST_KEY).unwrap().as_deref(), Some("[1]"));
        assert!(matches!(
            store.set_item(USERS_KEY, "[]".to_string()),
            Err(StoreError::Io(_))
        ));
        assert_eq!(store.get_item(USERS_KEY).unwrap(), None);
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"<<<").unwrap();

        let store = LocalStore::new(FileStore::open(&path).unwrap());
        assert!(!store.contains(AUCTIONS_KEY).unwrap());

        std::fs::remove_file(&path).unwrap();
    }
}
