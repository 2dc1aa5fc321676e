use super::*;
use crate::fakes::item;

#[test]
fn preloading_same_url_twice_adds_one_hint() {
    let mut preloader = ModelPreloader::new(HintRegistry::default());

    assert!(preloader.preload("/models/burger.glb"));
    assert!(!preloader.preload("/models/burger.glb"));

    assert_eq!(
        preloader.hints().hints(),
        &[("/models/burger.glb".to_string(), PreloadKind::Model)]
    );
}

#[test]
fn only_first_item_glb_is_hinted() {
    let mut preloader = ModelPreloader::new(HintRegistry::default());
    let items = vec![
        item("burger", Some("/models/burger.glb"), None),
        item("pizza", Some("/models/pizza.glb"), None),
    ];

    assert!(preloader.preload_first(&items));
    assert!(!preloader.preload_first(&items));
    assert_eq!(preloader.hints().hints().len(), 1);
}

#[test]
fn nothing_to_hint_without_first_glb() {
    let mut preloader = ModelPreloader::new(HintRegistry::default());
    assert!(!preloader.preload_first(&[]));
    assert!(!preloader.preload_first(&[item("soup", None, None)]));
    assert!(preloader.hints().hints().is_empty());
}

#[test]
fn unresolvable_href_is_not_reported_as_hinted() {
    let base = Url::parse("http://menu.test/").expect("base");
    let mut preloader = ModelPreloader::new(HttpWarmupHints::new(Client::new(), base));

    assert!(!preloader.preload("http://[::1"));
    assert_eq!(preloader.hints().issued(), 0);
    assert!(!preloader.hints().has_hint("http://[::1"));
}

#[tokio::test]
async fn http_warmup_issues_single_request_per_asset() {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use std::time::Duration;

    use axum::{routing::get, Router};
    use tokio::net::TcpListener;

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/models/burger.glb",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                "glb-bytes"
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let base = Url::parse(&format!("http://{addr}/")).expect("base");
    let mut preloader = ModelPreloader::new(HttpWarmupHints::new(Client::new(), base));
    assert!(preloader.preload("/models/burger.glb"));
    assert!(!preloader.preload("/models/burger.glb"));
    assert_eq!(preloader.hints().issued(), 1);

    for _ in 0..50 {
        if hits.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
