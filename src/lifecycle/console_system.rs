use crate::clients::{PlaylistClient, ScreenClient, SlideClient};
use crate::lists;
use crate::model::{fixtures, Playlist, Screen, Slide};
use list_framework::{
    ListController, ListHandle, MemoryNavigator, Notifier, ResourceActor, TracingNotifier,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

const MAILBOX: usize = 32;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Invalid fixture data: {0}")]
    Fixture(#[from] serde_json::Error),
    #[error("Task failed: {0}")]
    TaskFailed(String),
}

/// Query strings each list page is opened with, as if typed into the address bar.
#[derive(Debug, Clone, Default)]
pub struct Routes {
    pub screens: String,
    pub playlists: String,
    pub slides: String,
}

/// Wires the three admin lists to their in-memory backends.
///
/// Each resource gets a [`ResourceActor`] seeded from the bundled fixtures and a
/// [`ListController`] reading its query state from its own [`MemoryNavigator`].
/// Slides that appear in a playlist are protected and refuse deletion.
///
/// ```ignore
/// let system = ConsoleSystem::new()?;
/// system.screens.set_search("lobby").await?;
/// let view = system.screens.view().await?;
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    pub screens: ListHandle<Screen>,
    pub playlists: ListHandle<Playlist>,
    pub slides: ListHandle<Slide>,

    pub screens_route: Arc<MemoryNavigator>,
    pub playlists_route: Arc<MemoryNavigator>,
    pub slides_route: Arc<MemoryNavigator>,

    /// Controllers first, then backends; shutdown awaits them in this order.
    handles: Vec<JoinHandle<()>>,
}

impl ConsoleSystem {
    pub fn new() -> Result<Self, ConsoleError> {
        Self::start(&Routes::default(), Arc::new(TracingNotifier))
    }

    pub fn with_notifier(notifier: Arc<dyn Notifier>) -> Result<Self, ConsoleError> {
        Self::start(&Routes::default(), notifier)
    }

    /// Spawns every backend and controller. Must be called inside a Tokio runtime.
    pub fn start(routes: &Routes, notifier: Arc<dyn Notifier>) -> Result<Self, ConsoleError> {
        Self::start_with_latency(routes, notifier, None)
    }

    /// Like [`start`](Self::start), with every backend reply delayed by `latency`.
    pub fn start_with_latency(
        routes: &Routes,
        notifier: Arc<dyn Notifier>,
        latency: Option<Duration>,
    ) -> Result<Self, ConsoleError> {
        let playlist_rows = fixtures::playlists()?;
        let usage = fixtures::slide_usage(&playlist_rows);

        // 1. Backends
        let (mut screen_actor, screen_backend) = ResourceActor::new(MAILBOX, fixtures::screens()?);
        let (mut playlist_actor, playlist_backend) = ResourceActor::new(MAILBOX, playlist_rows);
        let (mut slide_actor, slide_backend) = ResourceActor::new(MAILBOX, fixtures::slides()?);
        if let Some(latency) = latency {
            screen_actor = screen_actor.with_latency(latency);
            playlist_actor = playlist_actor.with_latency(latency);
            slide_actor = slide_actor.with_latency(latency);
        }
        for (slide, titles) in usage {
            slide_actor = slide_actor.protect(
                slide,
                format!("Slide is used by playlist(s): {}", titles.join(", ")),
            );
        }

        // 2. Controllers
        let screens_route = Arc::new(MemoryNavigator::new(&routes.screens));
        let playlists_route = Arc::new(MemoryNavigator::new(&routes.playlists));
        let slides_route = Arc::new(MemoryNavigator::new(&routes.slides));

        let (screen_list, screens) = ListController::<Screen, _>::new(
            ScreenClient::new(screen_backend),
            screens_route.clone(),
            notifier.clone(),
            lists::screens::config(),
        );
        let (playlist_list, playlists) = ListController::<Playlist, _>::new(
            PlaylistClient::new(playlist_backend),
            playlists_route.clone(),
            notifier.clone(),
            lists::playlists::config(),
        );
        let (slide_list, slides) = ListController::<Slide, _>::new(
            SlideClient::new(slide_backend),
            slides_route.clone(),
            notifier,
            lists::slides::config(),
        );

        let handles = vec![
            tokio::spawn(
                screen_list
                    .with_filter("view")
                    .run()
                    .instrument(tracing::info_span!("screens_list")),
            ),
            tokio::spawn(
                playlist_list
                    .with_filter("published")
                    .run()
                    .instrument(tracing::info_span!("playlists_list")),
            ),
            tokio::spawn(slide_list.run().instrument(tracing::info_span!("slides_list"))),
            tokio::spawn(screen_actor.run()),
            tokio::spawn(playlist_actor.run()),
            tokio::spawn(slide_actor.run()),
        ];

        info!("Console started");
        Ok(Self {
            screens,
            playlists,
            slides,
            screens_route,
            playlists_route,
            slides_route,
            handles,
        })
    }

    /// Drops the list handles and waits until every task has finished.
    ///
    /// Deletions already confirmed keep draining before their controller stops.
    /// Each backend stops once its controller, the last holder of its client, is gone.
    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        info!("Shutting down console...");

        drop(self.screens);
        drop(self.playlists);
        drop(self.slides);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Console task failed: {:?}", e);
                return Err(ConsoleError::TaskFailed(format!("{e:?}")));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
