/// Чтение и запись табличных файлов

pub mod loader;
pub mod writer;

pub use loader::{load, load_reader, load_str, parse_field};
pub use writer::{save, write_table};
