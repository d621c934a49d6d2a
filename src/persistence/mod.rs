pub mod files;
pub mod settings;
pub mod storage;

pub use files::{
    atomic_write, ensure_pacer_dir, get_pacer_dir, init_local_pacer, log_file, read_file,
    settings_file,
};
pub use settings::{load_settings, save_settings, Settings};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
