use codefirst_core::schema::db::{Column, ForeignKey, Schema, StoreFilter, Table};
use rusqlite::{Connection, Result};

pub(crate) fn schema(connection: &Connection, filter: &StoreFilter) -> Result<Schema> {
    let mut tables = vec![];

    for name in table_names(connection)? {
        if filter.excludes(&name) {
            tracing::debug!(table = %name, "excluded");
            continue;
        }

        tables.push(table(connection, name)?);
    }

    resolve_foreign_key_names(&mut tables);

    Ok(Schema { tables })
}

/// Rewrites foreign key identifiers to the names the tables declare.
///
/// SQLite compares identifiers without regard to ASCII case, but
/// `pragma_foreign_key_list` reports them as written in the constraint.
fn resolve_foreign_key_names(tables: &mut [Table]) {
    let declared: Vec<(String, Vec<String>)> = tables
        .iter()
        .map(|table| {
            let columns = table.columns.iter().map(|column| column.name.clone());
            (table.name.clone(), columns.collect())
        })
        .collect();

    for (index, table) in tables.iter_mut().enumerate() {
        let own_columns = &declared[index].1;

        for fk in &mut table.foreign_keys {
            canonicalize(&mut fk.columns, own_columns);

            let Some((name, columns)) = declared
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&fk.references))
            else {
                continue;
            };

            fk.references = name.clone();
            canonicalize(&mut fk.referenced_columns, columns);
        }
    }
}

fn canonicalize(names: &mut [String], declared: &[String]) {
    for name in names {
        if let Some(found) = declared.iter().find(|d| d.eq_ignore_ascii_case(name.as_str())) {
            name.clone_from(found);
        }
    }
}

fn table_names(connection: &Connection) -> Result<Vec<String>> {
    let mut stmt = connection.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
         ORDER BY rowid",
    )?;

    let names = stmt.query_map([], |row| row.get(0))?;
    names.collect()
}

fn table(connection: &Connection, name: String) -> Result<Table> {
    let mut columns = vec![];

    // (position in the primary key, column name)
    let mut primary_key = vec![];

    let mut stmt = connection.prepare(
        "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
    )?;
    let mut rows = stmt.query([&name])?;

    while let Some(row) = rows.next()? {
        let column_name: String = row.get(0)?;
        let ty: String = row.get(1)?;
        let not_null: bool = row.get(2)?;
        let pk: u32 = row.get(3)?;

        if pk > 0 {
            primary_key.push((pk, column_name.clone()));
        }

        columns.push(Column::new(column_name, ty).nullable(!not_null && pk == 0));
    }

    primary_key.sort();

    // A lone `INTEGER PRIMARY KEY` column aliases the rowid.
    if let [(_, key)] = &primary_key[..] {
        for column in columns.iter_mut().filter(|column| &column.name == key) {
            column.auto_increment = column.ty.base() == "INTEGER";
        }
    }

    let foreign_keys = foreign_keys(connection, &name)?;

    Ok(Table {
        name,
        owner: None,
        columns,
        primary_key: primary_key.into_iter().map(|(_, name)| name).collect(),
        foreign_keys,
    })
}

fn foreign_keys(connection: &Connection, table: &str) -> Result<Vec<ForeignKey>> {
    let mut stmt = connection.prepare(
        "SELECT id, \"table\", \"from\", \"to\" FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
    )?;
    let mut rows = stmt.query([table])?;

    let mut foreign_keys: Vec<(i64, ForeignKey)> = vec![];

    while let Some(row) = rows.next()? {
        let id: i64 = row.get(0)?;
        let references: String = row.get(1)?;
        let from: String = row.get(2)?;
        let to: Option<String> = row.get(3)?;

        if let Some((_, fk)) = foreign_keys.last_mut().filter(|(last, _)| *last == id) {
            fk.columns.push(from);
            fk.referenced_columns.extend(to);
            continue;
        }

        foreign_keys.push((id, ForeignKey::new([from], references).referencing(to)));
    }

    Ok(foreign_keys
        .into_iter()
        .map(|(_, mut fk)| {
            // Referencing the implicit primary key leaves `to` empty.
            if fk.referenced_columns.len() != fk.columns.len() {
                fk.referenced_columns.clear();
            }
            fk
        })
        .collect())
}
