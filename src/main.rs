use list_framework::tracing::setup_tracing;
use list_framework::{ListHandle, ListItem, ListView, Navigator};
use signage_admin::lifecycle::ConsoleSystem;
use signage_admin::lists;
use std::error::Error;
use std::time::Duration;
use tracing::{info, warn, Instrument};

/// Polls the controller until nothing is loading or deleting.
async fn settled<T: ListItem>(list: &ListHandle<T>) -> Result<ListView<T>, Box<dyn Error>> {
    loop {
        let view = list.view().await?;
        if !view.loading && !view.is_deleting() && !view.merging {
            return Ok(view);
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    info!("Starting signage admin console");
    let system = ConsoleSystem::new()?;
    let columns = lists::screens::columns();

    async {
        system.screens.set_search("o").await?;
        system.screens.sort_by_column("size").await?;
        let view = settled(&system.screens).await?;
        println!("{}", lists::render_text(&view, &columns));

        let doomed: Vec<_> = view.items().iter().take(2).map(|s| s.item_ref()).collect();
        if system.screens.request_delete(doomed).await? {
            system.screens.confirm().await?;
        }
        let view = settled(&system.screens).await?;
        println!("{}", lists::render_text(&view, &columns));
        info!(query = %system.screens_route.query_string(), "Screens route");
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(tracing::info_span!("screens"))
    .await?;

    async {
        let view = settled(&system.slides).await?;
        let used: Vec<_> = view.items().iter().take(1).map(|s| s.item_ref()).collect();
        if system.slides.request_delete(used).await? {
            system.slides.confirm().await?;
        }
        let view = settled(&system.slides).await?;
        if let Some(error) = &view.error {
            warn!(%error, "Slide list reported an error");
        }
        println!("{}", lists::render_text(&view, &lists::slides::columns()));
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(tracing::info_span!("slides"))
    .await?;

    async {
        let view = settled(&system.playlists).await?;
        for playlist in view.items().iter().take(2) {
            system.playlists.toggle_select(playlist.item_ref()).await?;
        }
        if system.playlists.request_merge().await? {
            system.playlists.confirm().await?;
        }
        let view = settled(&system.playlists).await?;
        println!("{}", lists::render_text(&view, &lists::playlists::columns()));
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(tracing::info_span!("playlists"))
    .await?;

    system.shutdown().await?;
    info!("Console demo completed");
    Ok(())
}
