//! Summary Extraction Integration Tests
//!
//! Tests for the keywords priority chain.

use soonsal_deploy::core::extract_keywords;

#[test]
fn test_meta_keywords_verbatim() {
    let html = r#"<html><head>
<meta name="soonsal-keywords" content="  Fed cuts rates  ">
<title>순살브리핑 — 3월 2일</title>
</head><body>
<h2 class="story-title">연준 금리 인하 — 시장 반응</h2>
</body></html>"#;

    assert_eq!(extract_keywords(html), "Fed cuts rates");
}

#[test]
fn test_story_titles_joined() {
    let html = r#"<html><head><title>순살브리핑 — 3월 2일</title></head><body>
<h2 class="story-title">연준 <em>금리</em> 인하 — 시장 반응</h2>
<p>본문</p>
<h2 class="story-title">유가 급등—OPEC 감산</h2>
<h2 class="story-title">엔비디아 실적 발표 이후 반도체 섹터 전반의 흐름 정리와 향후 전망까지 한 번에 살펴보기</h2>
<h2 class="section-title">Not a story</h2>
</body></html>"#;

    assert_eq!(
        extract_keywords(html),
        "연준 금리 인하, 유가 급등, 엔비디아 실적 발표 이후 반도체 섹터 전반의 흐름 정리와 향후 전망까지"
    );
}

#[test]
fn test_title_brand_removed() {
    let html = "<html><head><title>순살카드뉴스 — 이번 주 시황</title></head><body></body></html>";
    assert_eq!(extract_keywords(html), "이번 주 시황");
}

#[test]
fn test_title_pipe_separator() {
    let html = "<html><head><title>순살크립토 | 비트코인 반감기</title></head></html>";
    assert_eq!(extract_keywords(html), "비트코인 반감기");
}

#[test]
fn test_title_without_brand() {
    let html = "<html><head><title>Weekly Crypto Wrap</title></head></html>";
    assert_eq!(extract_keywords(html), "Weekly Crypto Wrap");
}

#[test]
fn test_untitled() {
    assert_eq!(extract_keywords(""), "Untitled");
    assert_eq!(extract_keywords("<html><head><title>  </title></head></html>"), "Untitled");
}
