use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Provider 回傳的原始 JSON 物件
pub type JsonObject = Map<String, Value>;

/// 地名解析後的目的地 ID，對我們來說是不透明的字串
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `dest_id` 可能是字串也可能是數字
    pub fn from_value(value: &Value) -> Option<Self> {
        text_value(value).map(Self)
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A hotel listing reduced to the columns we export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub hotel_id: Option<String>,
    pub hotel_name: Option<String>,
    pub url: Option<String>,
    pub class: Option<Number>,
    pub latitude: Option<Number>,
    pub longitude: Option<Number>,
}

impl Venue {
    /// Projects a provider hotel object onto the fixed field list.
    ///
    /// Missing, `null` or mistyped fields become `None`; projection never fails.
    pub fn project(obj: &JsonObject) -> Self {
        Self {
            hotel_id: text_field(obj, "hotel_id"),
            hotel_name: text_field(obj, "hotel_name"),
            url: text_field(obj, "url"),
            class: number_field(obj, "class"),
            latitude: number_field(obj, "latitude"),
            longitude: number_field(obj, "longitude"),
        }
    }

    /// 日誌用的簡短名稱
    pub fn label(&self) -> String {
        match (&self.hotel_id, &self.hotel_name) {
            (Some(id), Some(name)) => format!("{} ({})", name, id),
            (Some(id), None) => id.clone(),
            (None, Some(name)) => name.clone(),
            (None, None) => "<unknown hotel>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub title: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub average_score: Option<Number>,
    pub date: Option<String>,
}

impl Review {
    pub fn project(obj: &JsonObject) -> Self {
        Self {
            title: text_field(obj, "title"),
            pros: text_field(obj, "pros"),
            cons: text_field(obj, "cons"),
            average_score: number_field(obj, "average_score"),
            date: text_field(obj, "date"),
        }
    }

    fn is_blank(&self) -> bool {
        *self == Review::default()
    }
}

/// 匯出檔中的一列：一間飯店加上一則評論（或空白佔位評論）
///
/// csv 不支援 `#[serde(flatten)]`，所以欄位直接展開。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub hotel_id: Option<String>,
    pub hotel_name: Option<String>,
    pub url: Option<String>,
    pub class: Option<Number>,
    pub latitude: Option<Number>,
    pub longitude: Option<Number>,
    pub title: Option<String>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub average_score: Option<Number>,
    pub date: Option<String>,
}

impl OutputRow {
    pub const HEADERS: [&'static str; 11] = [
        "hotel_id",
        "hotel_name",
        "url",
        "class",
        "latitude",
        "longitude",
        "title",
        "pros",
        "cons",
        "average_score",
        "date",
    ];

    pub fn new(venue: &Venue, review: &Review) -> Self {
        Self {
            hotel_id: venue.hotel_id.clone(),
            hotel_name: venue.hotel_name.clone(),
            url: venue.url.clone(),
            class: venue.class.clone(),
            latitude: venue.latitude.clone(),
            longitude: venue.longitude.clone(),
            title: review.title.clone(),
            pros: review.pros.clone(),
            cons: review.cons.clone(),
            average_score: review.average_score.clone(),
            date: review.date.clone(),
        }
    }

    /// 沒有評論的飯店也要出現在匯出檔中，評論欄位留白
    pub fn placeholder(venue: &Venue) -> Self {
        Self::new(venue, &Review::default())
    }

    pub fn venue(&self) -> Venue {
        Venue {
            hotel_id: self.hotel_id.clone(),
            hotel_name: self.hotel_name.clone(),
            url: self.url.clone(),
            class: self.class.clone(),
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
        }
    }

    /// `None` when every review cell is blank.
    pub fn review(&self) -> Option<Review> {
        let review = Review {
            title: self.title.clone(),
            pros: self.pros.clone(),
            cons: self.cons.clone(),
            average_score: self.average_score.clone(),
            date: self.date.clone(),
        };
        (!review.is_blank()).then_some(review)
    }

    /// 評論欄位全部空白。佔位列一定如此，但內容全空的真實評論也會符合，
    /// 是否為佔位列以 `EnrichmentReport::placeholder_count` 為準
    pub fn has_blank_review(&self) -> bool {
        self.review().is_none()
    }
}

/// 某間飯店的評論抓取失敗，該飯店不會出現在匯出檔
#[derive(Debug, Clone, PartialEq)]
pub struct FailedVenue {
    pub venue: Venue,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct EnrichmentReport {
    pub venue_count: usize,
    pub rows: Vec<OutputRow>,
    /// 沒有評論、只輸出佔位列的飯店數
    pub placeholder_count: usize,
    pub failed_venues: Vec<FailedVenue>,
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key).and_then(text_value)
}

/// 保留 provider 的數值原樣（整數仍是整數），數字字串也接受
fn number_field(obj: &JsonObject, key: &str) -> Option<Number> {
    match obj.get(key)? {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
