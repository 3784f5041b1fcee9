use serde::{Deserialize, Serialize};

/// 書籍ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 利用者ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// カテゴリID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 書籍の保持者を表す値
///
/// 永続化層では「誰にも貸し出していない」を番兵値 0 で表現するが、
/// ドメイン内では列挙型で明示する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Holder {
    /// 貸出可能（番兵値）
    #[default]
    Available,
    /// 利用者に貸出中
    LentTo(PersonId),
}

impl Holder {
    /// 永続化層で使用する番兵値
    pub const SENTINEL: i64 = 0;

    /// 生の保持者参照から変換する
    pub fn from_raw(raw: i64) -> Self {
        if raw == Self::SENTINEL {
            Holder::Available
        } else {
            Holder::LentTo(PersonId::new(raw))
        }
    }

    /// 生の保持者参照へ変換する
    pub fn to_raw(self) -> i64 {
        match self {
            Holder::Available => Self::SENTINEL,
            Holder::LentTo(person_id) => person_id.value(),
        }
    }

    pub fn person_id(self) -> Option<PersonId> {
        match self {
            Holder::Available => None,
            Holder::LentTo(person_id) => Some(person_id),
        }
    }

    pub fn is_lent(self) -> bool {
        matches!(self, Holder::LentTo(_))
    }
}

/// 書籍の貸出状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookState {
    /// 貸出可能
    Available,
    /// 貸出中
    Lent,
}

impl BookState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookState::Available => "available",
            BookState::Lent => "lent",
        }
    }
}

impl From<Holder> for BookState {
    fn from(holder: Holder) -> Self {
        match holder {
            Holder::Available => BookState::Available,
            Holder::LentTo(_) => BookState::Lent,
        }
    }
}
