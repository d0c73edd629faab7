use newsdesk_core::{
    article_cards, source_cards, update, AppState, Article, Msg, Page, PageStatus, Payload,
    SearchForm, SiteLink, SiteView, Source, SourceLink,
};
use pretty_assertions::assert_eq;

fn article(title: &str, url: &str) -> Article {
    Article {
        title: title.to_string(),
        url: url.to_string(),
        ..Article::default()
    }
}

#[test]
fn one_card_per_article_in_input_order() {
    let articles = vec![
        article("First", "https://news.example.com/1"),
        article("Second", "https://news.example.com/2"),
        article("Third", "https://news.example.com/3"),
    ];

    let titles: Vec<String> = article_cards(&articles)
        .into_iter()
        .map(|card| card.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn missing_article_fields_get_placeholders() {
    let cards = article_cards(&[Article {
        url: "https://www.example.com/story".to_string(),
        category: "Unknown".to_string(),
        ..Article::default()
    }]);
    let card = &cards[0];

    assert_eq!(card.title, "Untitled article");
    assert_eq!(card.summary, "No summary available.");
    assert_eq!(card.category, "Uncategorized");
    assert_eq!(card.published, "Date unknown");
    assert_eq!(card.authors, "Unknown author");
    assert_eq!(card.source, "example.com");
    assert_eq!(card.image_url, None);
    assert_eq!(card.link.as_deref(), Some("https://www.example.com/story"));
}

#[test]
fn article_fields_pass_through() {
    let cards = article_cards(&[Article {
        title: "Tech stocks surge".to_string(),
        url: "https://www.example.com/tech".to_string(),
        summary: Some("Gains across the board.".to_string()),
        image_url: Some("https://www.example.com/img.jpg".to_string()),
        category: "BUSINESS".to_string(),
        publish_date: Some("2025-03-08".to_string()),
        authors: vec!["Jane Smith".to_string(), " ".to_string(), "John Doe".to_string()],
        source_domain: "example.com".to_string(),
    }]);
    let card = &cards[0];

    assert_eq!(card.category, "BUSINESS");
    assert_eq!(card.published, "2025-03-08");
    assert_eq!(card.authors, "Jane Smith, John Doe");
    assert_eq!(card.image_url.as_deref(), Some("https://www.example.com/img.jpg"));
}

#[test]
fn source_with_unparseable_url_has_no_link() {
    let cards = source_cards(&[
        Source {
            name: Some("Reuters".to_string()),
            description: Some("Wire service".to_string()),
            url: "https://www.reuters.com".to_string(),
        },
        Source {
            name: None,
            description: None,
            url: "not a url".to_string(),
        },
    ]);

    assert_eq!(
        cards[0].link,
        SourceLink::Valid {
            href: "https://www.reuters.com/".to_string(),
            host: "www.reuters.com".to_string(),
        }
    );
    assert_eq!(cards[1].name, "Unnamed source");
    assert_eq!(cards[1].description, "No description available.");
    assert_eq!(
        cards[1].link,
        SourceLink::Invalid {
            raw: "not a url".to_string()
        }
    );
}

#[test]
fn success_view_exposes_cards() {
    let (state, _) = update(
        AppState::new(),
        Msg::FieldChanged {
            page: Page::Search,
            field: "url".into(),
            value: "https://www.bbc.com".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::FieldChanged {
            page: Page::Search,
            field: "query".into(),
            value: "rates".into(),
        },
    );
    let (state, _) = update(state, Msg::Submitted(Page::Search));
    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            page: Page::Search,
            token: 1,
            result: Ok(Payload::Articles {
                articles: vec![
                    article("A", "https://www.bbc.com/a"),
                    article("B", "https://www.bbc.com/b"),
                ],
                count: 2,
                domain: Some("www.bbc.com".into()),
                message: None,
            }),
        },
    );

    let view = state.view();
    let page = view.page(Page::Search).expect("search page view");
    assert_eq!(
        page.fields,
        vec![
            ("url".to_string(), "https://www.bbc.com".to_string()),
            ("query".to_string(), "rates".to_string()),
            ("method".to_string(), String::new()),
        ]
    );
    match &page.status {
        PageStatus::Results(results) => {
            assert_eq!(results.headline, "2 articles from www.bbc.com");
            assert_eq!(results.articles.len(), 2);
            assert_eq!(results.articles[1].title, "B");
            assert!(results.sources.is_empty());
        }
        other => panic!("unexpected status {other:?}"),
    }
}

#[test]
fn explored_site_becomes_site_view() {
    let (state, _) = update(
        AppState::new(),
        Msg::FieldChanged {
            page: Page::Explore,
            field: "url".into(),
            value: "https://apnews.com".into(),
        },
    );
    let (state, _) = update(state, Msg::Submitted(Page::Explore));
    let (state, _) = update(
        state,
        Msg::ResponseReceived {
            page: Page::Explore,
            token: 1,
            result: Ok(Payload::Explored {
                domain: "apnews.com".into(),
                title: None,
                links: vec![
                    SiteLink {
                        url: "https://apnews.com/politics".into(),
                        text: "Politics".into(),
                    },
                    SiteLink {
                        url: "https://apnews.com/world".into(),
                        text: " ".into(),
                    },
                ],
                sections: vec!["Top Stories".into(), "".into()],
                search_form: Some(SearchForm {
                    action: "https://apnews.com/search".into(),
                    method: "get".into(),
                    inputs: vec!["q".into()],
                }),
                link_count: 57,
            }),
        },
    );

    let view = state.view();
    let page = view.page(Page::Explore).expect("explore page view");
    assert_eq!(
        page.status,
        PageStatus::Site(SiteView {
            title: "Untitled site".into(),
            headline: "57 links from apnews.com".into(),
            sections: vec!["Top Stories".into()],
            links: vec![
                ("Politics".into(), "https://apnews.com/politics".into()),
                (
                    "https://apnews.com/world".into(),
                    "https://apnews.com/world".into()
                ),
            ],
            search_form: Some("GET https://apnews.com/search (q)".into()),
        })
    );
}
