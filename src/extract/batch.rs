use std::ops::Range;

use crate::{
    Res,
    spotify::SpotifyApi,
    types::{AlbumId, AudioFeatures, PlaylistPage, TrackId},
};

use super::ExtractError;

/// Labels and audio features of one playlist page, index-aligned with the
/// page's present track ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResolution {
    pub labels: Vec<Option<String>>,
    pub features: Vec<Option<AudioFeatures>>,
}

/// Splits `0..len` into `chunks` contiguous ranges.
///
/// Boundaries are `(i * len) / chunks`, floored, so chunk sizes differ by
/// at most one and the ranges always cover `0..len` exactly once. The
/// count is clamped to `1..=len`: more chunks than ids would only add empty
/// ranges, so every id then gets a range of its own.
pub fn chunk_bounds(len: usize, chunks: usize) -> Vec<Range<usize>> {
    let chunks = chunks.clamp(1, len.max(1));
    (0..chunks)
        .map(|i| (i * len / chunks)..((i + 1) * len / chunks))
        .collect()
}

/// Resolves the album label of every track, one entry per id, in order.
///
/// Ids are processed in `chunks` slices. Per slice the tracks are looked up
/// for their album ids, then the present album ids for their labels. A
/// missing track, album id, album or label yields `None` at that position;
/// it never shifts later entries.
pub async fn resolve_labels<C: SpotifyApi + ?Sized>(
    client: &C,
    ids: &[TrackId],
    chunks: usize,
) -> Res<Vec<Option<String>>> {
    let mut labels = Vec::with_capacity(ids.len());

    for bounds in chunk_bounds(ids.len(), chunks) {
        let chunk = &ids[bounds];
        if chunk.is_empty() {
            continue;
        }

        let album_ids = resolve_album_ids(client, chunk).await?;
        labels.extend(resolve_album_labels(client, &album_ids).await?);
    }

    Ok(labels)
}

/// Resolves labels and audio features for one page.
///
/// Slots without a track id are dropped first. Labels are resolved in
/// chunks; the audio features of the whole page are requested in a single
/// call, which stays within the endpoint's 100-id limit because a page
/// holds at most 100 slots.
pub async fn resolve_page<C: SpotifyApi + ?Sized>(
    client: &C,
    page: &PlaylistPage,
    chunks: usize,
) -> Res<PageResolution> {
    let ids: Vec<TrackId> = page.track_ids().into_iter().flatten().collect();
    if ids.is_empty() {
        return Ok(PageResolution::default());
    }

    let labels = resolve_labels(client, &ids, chunks).await?;

    let features = client.audio_features(&ids).await?;
    ensure_aligned("audio-features", ids.len(), features.len())?;

    Ok(PageResolution { labels, features })
}

async fn resolve_album_ids<C: SpotifyApi + ?Sized>(
    client: &C,
    chunk: &[TrackId],
) -> Res<Vec<Option<AlbumId>>> {
    let tracks = client.tracks(chunk).await?;
    ensure_aligned("tracks", chunk.len(), tracks.len())?;

    Ok(tracks
        .into_iter()
        .map(|track| track.and_then(|t| t.album).and_then(|a| a.id))
        .collect())
}

async fn resolve_album_labels<C: SpotifyApi + ?Sized>(
    client: &C,
    album_ids: &[Option<AlbumId>],
) -> Res<Vec<Option<String>>> {
    let present: Vec<AlbumId> = album_ids.iter().flatten().cloned().collect();
    if present.is_empty() {
        return Ok(vec![None; album_ids.len()]);
    }

    let albums = client.albums(&present).await?;
    ensure_aligned("albums", present.len(), albums.len())?;

    // Walk the album results alongside the positions that requested them.
    let mut albums = albums.into_iter();
    Ok(album_ids
        .iter()
        .map(|id| match id {
            Some(_) => albums.next().flatten().and_then(|a| a.label),
            None => None,
        })
        .collect())
}

fn ensure_aligned(
    call: &'static str,
    requested: usize,
    returned: usize,
) -> Result<(), ExtractError> {
    if requested != returned {
        return Err(ExtractError::LengthMismatch {
            call,
            requested,
            returned,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(len: usize, chunks: usize) -> Vec<usize> {
        chunk_bounds(len, chunks).into_iter().flatten().collect()
    }

    #[test]
    fn chunk_bounds_cover_every_index_once() {
        for len in 0..57 {
            assert_eq!(concat(len, 10), (0..len).collect::<Vec<_>>(), "len {}", len);
        }
    }

    #[test]
    fn chunk_bounds_floor_like_proportional_slicing() {
        let sizes: Vec<usize> = chunk_bounds(12, 10).iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 1, 2, 1, 1, 1, 1, 2]);

        let sizes: Vec<usize> = chunk_bounds(3, 10).iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1]);
    }

    #[test]
    fn chunk_bounds_huge_chunk_count_gives_singletons() {
        assert_eq!(chunk_bounds(3, usize::MAX), vec![0..1, 1..2, 2..3]);
        assert_eq!(chunk_bounds(2, 4_000_000_000), vec![0..1, 1..2]);
        assert_eq!(chunk_bounds(0, usize::MAX), vec![0..0]);
    }

    #[test]
    fn chunk_bounds_last_chunk_ends_at_len() {
        let bounds = chunk_bounds(101, 10);
        assert_eq!(bounds.len(), 10);
        assert_eq!(bounds.last().map(|r| r.end), Some(101));
    }

    #[test]
    fn chunk_bounds_zero_chunks_means_one() {
        assert_eq!(chunk_bounds(5, 0), vec![0..5]);
    }
}
