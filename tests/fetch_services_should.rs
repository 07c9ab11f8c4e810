use cehennemi_edge::server::error::Error;
use cehennemi_edge::server::services::fetch_services::is_challenge_page;
use cehennemi_edge::server::services::solver_services::{ChallengeSolverTrait, NoopChallengeSolver};

#[test]
fn test_recognizes_the_anti_bot_interstitial() {
    let body = r#"<html><head><title>Just a moment...</title></head>
<body>Checking your browser before accessing the site.</body></html>"#;

    assert!(is_challenge_page(body));
}

#[test]
fn test_lets_ordinary_pages_through() {
    let body = r#"<html><body><h1>Büyük Film izle</h1></body></html>"#;

    assert!(!is_challenge_page(body));
}

#[tokio::test]
async fn test_noop_solver_reports_the_missing_capability() {
    let solver = NoopChallengeSolver;

    // the full request shape is handed over, xhr marker included
    let result = solver
        .solve("https://www.hdfilmcehennemi.la/buyuk-film-izle", None, true)
        .await;

    assert!(matches!(result, Err(Error::ChallengeBypass(_))));
}
