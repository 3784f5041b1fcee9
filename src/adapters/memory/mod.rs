//! インメモリのレコードストア
//!
//! テストおよび `storage.backend = "memory"` での起動に使用する。
//! 各表は非同期ミューテックスで保護され、条件付き更新は他の書き込みと直列化される。
//! 書籍と利用者の両方を参照する操作は、必ず books → persons の順でロックを取る。

pub mod book_store;
pub mod category_store;
pub mod person_store;

pub use book_store::BookStore;
pub use category_store::CategoryStore;
pub use person_store::PersonStore;

use crate::domain::{book::Book, category::Category, person::Person};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

type SharedTable<T> = Arc<Mutex<Table<T>>>;

/// 採番付きの表
#[derive(Debug)]
struct Table<T> {
    last_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }

    /// 次のIDを採番する（1始まり。0は番兵値として使われる）
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

fn shared_table<T>() -> SharedTable<T> {
    Arc::new(Mutex::new(Table::new()))
}

/// 3つのストアが共有する表の集合
///
/// 書籍ストアと利用者ストアは同じ表を参照するため、
/// 貸出と利用者削除を互いに直列化できる。
#[derive(Clone)]
pub struct Database {
    books: SharedTable<Book>,
    persons: SharedTable<Person>,
    categories: SharedTable<Category>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            books: shared_table(),
            persons: shared_table(),
            categories: shared_table(),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
