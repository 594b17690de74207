pub(crate) fn open_db(reset: bool) -> anyhow::Result<rusqlite::Connection> {
    let db = rusqlite::Connection::open("./db.sqlite")?;
    db.execute(
        "CREATE TABLE IF NOT EXISTS stories (id TEXT PRIMARY KEY)",
        (),
    )?;

    if reset {
        db.execute("DELETE FROM stories", ())?;
        tracing::info!("Reset DB");
    }

    Ok(db)
}

pub(crate) fn get_seen_stories(db: &rusqlite::Connection) -> anyhow::Result<Vec<String>> {
    let mut stmt = db.prepare("SELECT id FROM stories")?;

    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(ids)
}

pub(crate) fn insert_stories(
    db: &rusqlite::Connection,
    stories: &[crate::Story],
) -> anyhow::Result<()> {
    let mut stmt = db.prepare("INSERT OR IGNORE INTO stories (id) VALUES (?)")?;

    for story in stories {
        stmt.execute((story.seen_key(),))?;
    }

    Ok(())
}
