use crate::app::{AppContext, Result};
use crate::store::BookmarkStore;

pub async fn list_hearings(ctx: &AppContext, file_number: &str) -> Result<()> {
    let hearings = ctx.synchronizer.load_hearings(file_number).await?;

    if hearings.is_empty() {
        println!("No hearings for {}", file_number);
        return Ok(());
    }

    for hearing in hearings {
        let time = ctx.normalizer.normalize_hearing(&hearing);
        println!("{} ({})", time.display, time.offset_label);
        println!(
            "  {} - {}",
            hearing.display_type(),
            hearing.party_name.as_deref().unwrap_or("Unknown party")
        );
        if let Some(court) = &hearing.court {
            println!("  {}", court.name);
        }
    }

    Ok(())
}

pub async fn show_status(ctx: &AppContext, file_number: &str) -> Result<()> {
    let status = ctx.synchronizer.status().refresh(file_number).await?;

    if status.is_subscribed {
        println!("{} is bookmarked", file_number);
    } else {
        println!("{} is not bookmarked", file_number);
    }
    Ok(())
}

/// Activate the file number the way a detail view does, then toggle it.
pub async fn toggle_bookmark(ctx: &AppContext, file_number: &str) -> Result<()> {
    if let Err(e) = ctx.synchronizer.activate(file_number).await {
        eprintln!("Could not load hearings for {}: {}", file_number, e);
    }

    let result = ctx.synchronizer.toggle_bookmark(file_number).await;

    let view = ctx.synchronizer.view(file_number);
    if let Some(message) = view.message {
        println!("{}", message);
    }
    let state = if view.bookmarked {
        "bookmarked"
    } else {
        "not bookmarked"
    };
    let pending = if view.pending { " (unconfirmed)" } else { "" };
    println!("{} is {}{}", file_number, state, pending);

    result.map(|_| ())
}

pub fn list_bookmarks(ctx: &AppContext) -> Result<()> {
    let bookmarks = ctx.store.list_subscribed()?;

    if bookmarks.is_empty() {
        println!("No bookmarks");
        return Ok(());
    }

    for bookmark in bookmarks {
        println!(
            "{} ({} hearings, {} unread)",
            bookmark.court_file_number,
            bookmark.hearings.len(),
            bookmark.unread_count()
        );
    }

    Ok(())
}

pub fn show_time(ctx: &AppContext, datetime: &str, offset: &str) -> Result<()> {
    let time = ctx.normalizer.normalize(datetime, offset)?;
    println!("{}", time.display);
    println!("{} ({})", time.offset_label, time.zone);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DocketError;
    use crate::remote::testing::FakeApi;

    #[tokio::test]
    async fn test_toggle_bookmark_caches_locally() {
        let api = FakeApi::with_hearings("CF-1234", 3);
        let ctx = AppContext::in_memory(api.clone()).unwrap();

        toggle_bookmark(&ctx, "CF-1234").await.unwrap();

        assert!(api.is_subscribed("CF-1234"));
        assert_eq!(ctx.store.list_subscribed().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_bookmark_without_hearings_fails() {
        let api = FakeApi::new();
        let ctx = AppContext::in_memory(api.clone()).unwrap();

        let err = toggle_bookmark(&ctx, "CF-404").await.unwrap_err();
        assert!(matches!(err, DocketError::InsufficientData(_)));
        assert_eq!(FakeApi::count(&api.add_calls), 0);
    }

    #[test]
    fn test_show_time_rejects_bad_offset() {
        let ctx = AppContext::in_memory(FakeApi::new()).unwrap();
        let err = show_time(&ctx, "2020-01-15T03:15:00Z", "0500").unwrap_err();
        assert!(matches!(err, DocketError::Format(_)));
    }
}
