use std::fmt;

use serde::{Deserialize, Serialize};

/// 榜单条目。所有字段都可能缺失，只读，每次加载整体替换。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default)]
    pub place: Option<i64>,
    #[serde(default)]
    pub movie_title: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(default)]
    pub star_cast: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// 年份既可能是数字也可能是字符串（如 "1994"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(serde_json::Number),
    Text(String),
}

impl Year {
    /// 0 和空串没有展示意义
    pub fn is_blank(&self) -> bool {
        match self {
            Year::Number(n) => n.as_f64() == Some(0.0),
            Year::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // 1994.0 显示为 1994
            Year::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.0}"),
                _ => write!(f, "{n}"),
            },
            Year::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviesResp {
    #[serde(default)]
    pub movies: Option<Vec<Movie>>,
}

impl MoviesResp {
    pub fn into_movies(self) -> Vec<Movie> {
        self.movies.unwrap_or_default()
    }
}
