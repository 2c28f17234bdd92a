use anyhow::Result;
use askama::Template;

use crate::model::movie::Movie;

/// 仪表盘最多渲染的条目数，与 API 返回多少无关
pub const MAX_CARDS: usize = 10;

pub const IMDB_TITLE_URL: &str = "https://www.imdb.com/title/";

const UNTITLED: &str = "Untitled";
const RANK_PLACEHOLDER: &str = "-";
const VALUE_PLACEHOLDER: &str = "—";
const NO_LINK: &str = "#";

/// 一张电影卡片的展示数据（未转义的纯文本）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// `#1`，缺失时 `#-`
    pub rank: String,
    pub title: String,
    /// 外链，没有可用链接时为 `#`
    pub link: String,
    pub rating: String,
    pub year: String,
    pub cast: String,
}

impl Card {
    pub fn from_movie(movie: &Movie) -> Self {
        let rank = match movie.place {
            Some(place) => format!("#{place}"),
            None => format!("#{RANK_PLACEHOLDER}"),
        };

        let title = non_empty(movie.movie_title.as_deref())
            .unwrap_or(UNTITLED)
            .to_string();

        let link = match (
            non_empty(movie.link.as_deref()),
            non_empty(movie.imdb_id.as_deref()),
        ) {
            (Some(link), _) => link.to_string(),
            (None, Some(id)) => format!("{IMDB_TITLE_URL}{id}/"),
            (None, None) => NO_LINK.to_string(),
        };

        let rating = movie
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| VALUE_PLACEHOLDER.to_string());

        let year = movie
            .year
            .as_ref()
            .filter(|y| !y.is_blank())
            .map(|y| y.to_string())
            .unwrap_or_else(|| VALUE_PLACEHOLDER.to_string());

        Self {
            rank,
            title,
            link,
            rating,
            year,
            cast: movie.star_cast.clone().unwrap_or_default(),
        }
    }

    /// `⭐ 9.3 • (1994)`
    pub fn details(&self) -> String {
        format!("⭐ {} • ({})", self.rating, self.year)
    }

    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }

    /// 渲染为网页版相同结构的 `movie-card` 片段，所有文本都经过转义
    pub fn to_html(&self) -> Result<String> {
        let tpl = CardTemplate {
            rank: escape_html(&self.rank),
            link: escape_html(&self.link),
            title: escape_html(&self.title),
            details: escape_html(&self.details()),
            cast: escape_html(&self.cast),
        };
        Ok(tpl.render()?)
    }
}

// — 模板 —
// 字段在进入模板前已由 `escape_html` 转义，模板本身不再转义

#[derive(Template)]
#[template(path = "card.html", escape = "none")]
struct CardTemplate {
    rank: String,
    link: String,
    title: String,
    details: String,
    cast: String,
}

#[derive(Template)]
#[template(path = "export.html", escape = "none")]
struct ExportTemplate {
    count: usize,
    generated_at: String,
    cards: Vec<String>,
}

/// 取前 `MAX_CARDS` 条，保持原顺序
pub fn cards_from(movies: &[Movie]) -> Vec<Card> {
    movies.iter().take(MAX_CARDS).map(Card::from_movie).collect()
}

/// 转义 `& < > "`，`&` 必须最先处理
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// 导出完整的静态 HTML 页面
pub fn render_document(cards: &[Card], generated_at: &str) -> Result<String> {
    let tpl = ExportTemplate {
        count: cards.len(),
        generated_at: escape_html(generated_at),
        cards: cards.iter().map(Card::to_html).collect::<Result<_>>()?,
    };
    Ok(tpl.render()?)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie::Year;

    fn movie(place: i64) -> Movie {
        Movie {
            place: Some(place),
            movie_title: Some(format!("Movie {place}")),
            ..Default::default()
        }
    }

    #[test]
    fn full_movie_card() {
        let m = Movie {
            place: Some(1),
            movie_title: Some("The Shawshank Redemption".into()),
            rating: Some(9.3),
            year: Some(Year::Text("1994".into())),
            star_cast: Some("Tim Robbins, Morgan Freeman".into()),
            imdb_id: Some("tt0111161".into()),
            link: Some("https://www.imdb.com/title/tt0111161/".into()),
        };
        let card = Card::from_movie(&m);
        assert_eq!(card.rank, "#1");
        assert_eq!(card.title, "The Shawshank Redemption");
        assert_eq!(card.details(), "⭐ 9.3 • (1994)");
        assert_eq!(card.link, "https://www.imdb.com/title/tt0111161/");
        assert!(card.has_link());
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let card = Card::from_movie(&Movie::default());
        assert_eq!(card.rank, "#-");
        assert_eq!(card.title, "Untitled");
        assert_eq!(card.details(), "⭐ — • (—)");
        assert_eq!(card.cast, "");
        assert_eq!(card.link, "#");
        assert!(!card.has_link());
    }

    #[test]
    fn empty_title_falls_back_to_untitled() {
        let m = Movie {
            movie_title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(Card::from_movie(&m).title, "Untitled");
    }

    #[test]
    fn zero_rating_is_shown_but_zero_year_is_not() {
        let m = Movie {
            rating: Some(0.0),
            year: Some(Year::Number(0.into())),
            ..Default::default()
        };
        assert_eq!(Card::from_movie(&m).details(), "⭐ 0 • (—)");
    }

    #[test]
    fn link_prefers_explicit_link_then_imdb_id() {
        let m = Movie {
            imdb_id: Some("tt0068646".into()),
            ..Default::default()
        };
        assert_eq!(
            Card::from_movie(&m).link,
            "https://www.imdb.com/title/tt0068646/"
        );

        let m = Movie {
            link: Some(String::new()),
            imdb_id: Some("tt0068646".into()),
            ..Default::default()
        };
        assert_eq!(
            Card::from_movie(&m).link,
            "https://www.imdb.com/title/tt0068646/"
        );

        let m = Movie {
            link: Some("https://example.org/x".into()),
            imdb_id: Some("tt0068646".into()),
            ..Default::default()
        };
        assert_eq!(Card::from_movie(&m).link, "https://example.org/x");
    }

    #[test]
    fn at_most_ten_cards_in_input_order() {
        let movies: Vec<Movie> = (1..=15).map(movie).collect();
        let cards = cards_from(&movies);
        assert_eq!(cards.len(), MAX_CARDS);
        let ranks: Vec<&str> = cards.iter().map(|c| c.rank.as_str()).collect();
        let expected: Vec<String> = (1..=10).map(|i| format!("#{i}")).collect();
        assert_eq!(ranks, expected);
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn script_in_cast_is_escaped_in_html() {
        let m = Movie {
            movie_title: Some("<b>Bold</b>".into()),
            star_cast: Some("<script>alert(1)</script>".into()),
            ..Default::default()
        };
        let html = Card::from_movie(&m).to_html().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt;"));
    }

    #[test]
    fn card_template_escapes_attribute_and_keeps_apostrophe() {
        let m = Movie {
            movie_title: Some("Schindler's List".into()),
            link: Some(r#"https://x/"onmouseover="a"#.into()),
            ..Default::default()
        };
        let html = Card::from_movie(&m).to_html().unwrap();
        assert!(html.contains(r#"href="https://x/&quot;onmouseover=&quot;a""#));
        assert!(html.contains(">Schindler's List</a>"));
        assert!(html.contains(r#"<p class="details">⭐ — • (—)</p>"#));
    }

    #[test]
    fn document_marks_empty_list() {
        let doc = render_document(&[], "2026-01-01 00:00").unwrap();
        assert!(doc.contains("id=\"empty\""));
        assert!(!doc.contains("movies-container"));

        let cards = cards_from(&[movie(1), movie(2)]);
        let doc = render_document(&cards, "now").unwrap();
        assert_eq!(doc.matches("class=\"movie-card\"").count(), 2);
        assert!(doc.contains("IMDb Top 2"));
    }
}
