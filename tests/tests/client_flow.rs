use anyhow::Result;
use std::net::SocketAddr;

use libris_client::{ApiClient, App};
use libris_server::Server;
use libris_storage_sled::SledStorageEngine;

async fn spawn_server() -> Result<SocketAddr> {
    let server = Server::builder().bind_address("127.0.0.1:0").with_storage(SledStorageEngine::new_test()?).build().await?;
    let bound = server.bind().await?;
    let addr = bound.local_addr();
    tokio::spawn(bound.serve());
    Ok(addr)
}

async fn spawn_app() -> Result<App> {
    let addr = spawn_server().await?;
    let mut app = App::new(ApiClient::new(format!("http://{}", addr)));
    app.refresh().await;
    Ok(app)
}

fn fill(draft: &mut libris_client::Draft, title: &str, author: &str, genre: &str, price: &str) {
    draft.title = title.to_string();
    draft.author = author.to_string();
    draft.genre = genre.to_string();
    draft.price = price.to_string();
}

#[tokio::test]
async fn create_edit_delete_flow() -> Result<()> {
    let mut app = spawn_app().await?;

    app.state.edit_create_draft(|draft| fill(draft, "Dune", "Herbert", "SciFi", "15"));
    app.submit_create().await;

    assert_eq!(app.state.rows().len(), 1);
    assert_eq!(app.state.form_error(), None);
    assert_eq!(app.state.create_draft(), &libris_client::Draft::default());
    let id = app.state.rows()[0].record.id;
    assert_eq!(app.state.record(id).unwrap().title(), Some("Dune"));

    // edit in place
    app.state.begin_edit(id);
    app.state.edit_row_draft(|draft| draft.price = "18".to_string());
    app.submit_edit().await;

    assert_eq!(app.state.editing_id(), None);
    assert_eq!(app.state.record(id).unwrap().price(), Some(18.0));
    assert_eq!(app.state.record(id).unwrap().title(), Some("Dune"));

    // the server agrees after a wholesale refresh
    app.refresh().await;
    assert_eq!(app.state.rows().len(), 1);
    assert_eq!(app.state.record(id).unwrap().price(), Some(18.0));

    app.delete(id).await;
    assert!(app.state.rows().is_empty());
    app.refresh().await;
    assert!(app.state.rows().is_empty());

    Ok(())
}

#[tokio::test]
async fn empty_field_never_reaches_the_server() -> Result<()> {
    let mut app = spawn_app().await?;

    app.state.edit_create_draft(|draft| fill(draft, "Dune", "", "SciFi", "15"));
    app.submit_create().await;

    assert_eq!(app.state.form_error(), Some("All fields are required."));
    assert_eq!(app.state.create_draft().title, "Dune");

    // no request was issued, so the server still has nothing
    app.refresh().await;
    assert!(app.state.rows().is_empty());

    Ok(())
}

#[tokio::test]
async fn cancel_edit_leaves_the_record_untouched() -> Result<()> {
    let mut app = spawn_app().await?;

    app.state.edit_create_draft(|draft| fill(draft, "Dune", "Herbert", "SciFi", "15"));
    app.submit_create().await;
    let id = app.state.rows()[0].record.id;
    let before = app.state.record(id).unwrap().clone();

    app.state.begin_edit(id);
    app.state.edit_row_draft(|draft| fill(draft, "Changed", "Changed", "Changed", "1"));
    app.state.cancel_edit();

    assert_eq!(app.state.record(id), Some(&before));
    app.refresh().await;
    assert_eq!(app.state.record(id), Some(&before));

    Ok(())
}

#[tokio::test]
async fn network_failure_keeps_the_acting_state() -> Result<()> {
    // reserve a port and release it so the connection is refused
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let dead_addr = listener.local_addr()?;
    drop(listener);

    let mut app = App::new(ApiClient::new(format!("http://{}", dead_addr)));

    app.state.edit_create_draft(|draft| fill(draft, "Dune", "Herbert", "SciFi", "15"));
    app.submit_create().await;

    assert_eq!(app.state.form_error(), Some("Error adding book. Please try again."));
    // the draft survives the failure for a retry
    assert_eq!(app.state.create_draft().title, "Dune");
    assert!(app.state.rows().is_empty());

    Ok(())
}
