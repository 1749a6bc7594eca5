mod common;

use std::sync::Arc;

use futures_util::future::join_all;

use common::InMemorySweetRepository;
use sweet_server::application::sweet_service::SweetService;
use sweet_server::data::sweet_repository::SweetRepository;
use sweet_server::domain::error::DomainError;
use sweet_server::domain::sweet::Sweet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_buyers_of_the_last_unit_get_one_success_and_one_out_of_stock() {
    let repo = Arc::new(InMemorySweetRepository::default());
    let sweet = repo
        .create(Sweet::new("Last Ladoo".into(), "Traditional".into(), 2.0, 1))
        .await
        .unwrap();
    let service = SweetService::new(repo.clone());

    let buyers = (0..2).map(|_| {
        let service = service.clone();
        let id = sweet.id;
        tokio::spawn(async move { service.purchase_sweet(id).await })
    });
    let outcomes: Vec<_> = join_all(buyers)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let successes: Vec<_> = outcomes.iter().filter(|o| o.is_ok()).collect();
    assert_eq!(successes.len(), 1);
    assert_eq!(successes[0].as_ref().unwrap().quantity, 0);
    assert!(
        outcomes
            .iter()
            .any(|o| matches!(o, Err(DomainError::OutOfStock)))
    );

    let stored = repo.find_by_id(sweet.id).await.unwrap().unwrap();
    assert_eq!(stored.quantity, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn a_crowd_never_drives_stock_negative() {
    let repo = Arc::new(InMemorySweetRepository::default());
    let sweet = repo
        .create(Sweet::new("Barfi".into(), "Traditional".into(), 3.0, 3))
        .await
        .unwrap();
    let service = SweetService::new(repo.clone());

    let buyers = (0..10).map(|_| {
        let service = service.clone();
        let id = sweet.id;
        tokio::spawn(async move { service.purchase_sweet(id).await })
    });
    let outcomes: Vec<_> = join_all(buyers)
        .await
        .into_iter()
        .map(|joined| joined.unwrap())
        .collect();

    let mut purchased = 0;
    let mut sold_out = 0;
    for outcome in &outcomes {
        match outcome {
            Ok(_) => purchased += 1,
            Err(DomainError::OutOfStock) => sold_out += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(purchased, 3);
    assert_eq!(sold_out, 7);

    let stored = repo.find_by_id(sweet.id).await.unwrap().unwrap();
    assert_eq!(stored.quantity, 0);
}
