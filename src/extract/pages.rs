use crate::{Res, spotify::SpotifyApi, types::PlaylistPage};

enum WalkState {
    Start,
    // Only the cursor of the last page is kept around.
    Cursor(PlaylistPage),
    Done,
}

/// Walks the pages of one playlist in order.
///
/// The walk is lazy (a page is fetched on each [`PageWalker::next`] call),
/// finite (it ends at the first page without a `next` cursor) and cannot be
/// restarted. A playlist that fits on one page yields exactly that page;
/// `next_page` is never called for a page without a cursor. After an error
/// the walker is exhausted.
pub struct PageWalker<'a, C: SpotifyApi + ?Sized> {
    client: &'a C,
    playlist_ref: String,
    state: WalkState,
    pages: usize,
}

impl<'a, C: SpotifyApi + ?Sized> PageWalker<'a, C> {
    pub fn new(client: &'a C, playlist_ref: &str) -> Self {
        Self {
            client,
            playlist_ref: playlist_ref.to_string(),
            state: WalkState::Start,
            pages: 0,
        }
    }

    /// Returns the next page, or `None` once the playlist is exhausted.
    pub async fn next(&mut self) -> Res<Option<PlaylistPage>> {
        let page = match std::mem::replace(&mut self.state, WalkState::Done) {
            WalkState::Start => self.client.playlist_tracks(&self.playlist_ref).await?,
            WalkState::Cursor(cursor) => self.client.next_page(&cursor).await?,
            WalkState::Done => return Ok(None),
        };

        if page.has_next() {
            self.state = WalkState::Cursor(PlaylistPage {
                items: Vec::new(),
                next: page.next.clone(),
            });
        }

        self.pages += 1;
        Ok(Some(page))
    }

    /// Number of pages yielded so far.
    pub fn pages(&self) -> usize {
        self.pages
    }
}
