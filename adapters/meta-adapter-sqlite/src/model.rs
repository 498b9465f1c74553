//! Lookup models backed by a plain SQLite table
//!
//! A [`SqliteTableModel`] searches the configured text columns with an
//! OR-combined, case-insensitive `LIKE '%q%'` filter. Column and table names
//! come from trusted configuration and are validated once; the query string
//! is always bound.

use async_trait::async_trait;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use crate::utils::*;
use jet::lookup::{EmptyQuerySet, LookupItem, LookupModel, QuerySet};
use jet::prelude::*;

/// Describes which table a model maps to and how its rows are labeled
#[derive(Clone, Debug)]
pub struct TableModelSpec {
	pub app_label: Box<str>,
	pub model_name: Box<str>,
	pub table: Box<str>,
	pub pk_column: Box<str>,
	/// Column rendered as the item label
	pub label_column: Box<str>,
	/// `None` means the model does not support free-text search
	pub search_fields: Option<Vec<Box<str>>>,
	pub extra_permissions: Vec<Box<str>>,
}

impl TableModelSpec {
	pub fn new(app_label: &str, model_name: &str, table: &str) -> Self {
		Self {
			app_label: app_label.into(),
			model_name: model_name.to_lowercase().into(),
			table: table.into(),
			pk_column: "id".into(),
			label_column: "id".into(),
			search_fields: None,
			extra_permissions: Vec::new(),
		}
	}

	pub fn pk(mut self, column: &str) -> Self {
		self.pk_column = column.into();
		self
	}

	pub fn label(mut self, column: &str) -> Self {
		self.label_column = column.into();
		self
	}

	pub fn search_fields(mut self, fields: &[&str]) -> Self {
		self.search_fields = Some(fields.iter().map(|f| Box::from(*f)).collect());
		self
	}

	pub fn extra_permission(mut self, codename: &str) -> Self {
		self.extra_permissions.push(codename.into());
		self
	}
}

fn is_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn check_identifier(name: &str) -> ClResult<()> {
	if is_identifier(name) {
		Ok(())
	} else {
		Err(Error::ConfigError(format!("invalid SQL identifier: {:?}", name)))
	}
}

/// Escapes `LIKE` wildcards so the query matches literally
fn escape_like(query: &str) -> String {
	let mut escaped = String::with_capacity(query.len() + 2);
	escaped.push('%');
	for c in query.chars() {
		if matches!(c, '%' | '_' | '\\') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped.push('%');
	escaped
}

#[derive(Debug)]
pub struct SqliteTableModel {
	db: SqlitePool,
	spec: TableModelSpec,
}

impl SqliteTableModel {
	pub fn new(db: SqlitePool, spec: TableModelSpec) -> ClResult<Self> {
		check_identifier(&spec.table)?;
		check_identifier(&spec.pk_column)?;
		check_identifier(&spec.label_column)?;
		for field in spec.search_fields.iter().flatten() {
			check_identifier(field)?;
		}
		if spec.app_label.is_empty() || spec.model_name.is_empty() {
			return Err(Error::ConfigError("app label and model name are required".into()));
		}
		Ok(Self { db, spec })
	}
}

#[async_trait]
impl LookupModel for SqliteTableModel {
	fn app_label(&self) -> &str {
		&self.spec.app_label
	}

	fn model_name(&self) -> &str {
		&self.spec.model_name
	}

	fn extra_permissions(&self) -> Vec<Box<str>> {
		self.spec.extra_permissions.clone()
	}

	fn search_fields(&self) -> Option<Vec<Box<str>>> {
		self.spec.search_fields.clone()
	}

	async fn filter_contains(&self, fields: &[Box<str>], query: &str) -> ClResult<Box<dyn QuerySet>> {
		if fields.is_empty() {
			return Ok(Box::new(EmptyQuerySet));
		}
		for field in fields {
			check_identifier(field)?;
		}
		Ok(Box::new(SqliteQuerySet {
			db: self.db.clone(),
			table: self.spec.table.clone(),
			pk_column: self.spec.pk_column.clone(),
			label_column: self.spec.label_column.clone(),
			fields: fields.into(),
			pattern: escape_like(query),
		}))
	}
}

/// Distinct rows of one table matching a contains filter, ordered by primary key
#[derive(Debug)]
pub struct SqliteQuerySet {
	db: SqlitePool,
	table: Box<str>,
	pk_column: Box<str>,
	label_column: Box<str>,
	fields: Box<[Box<str>]>,
	pattern: String,
}

impl SqliteQuerySet {
	fn push_where<'a>(&'a self, query: &mut QueryBuilder<'a, Sqlite>) {
		query.push(" WHERE ");
		for (i, field) in self.fields.iter().enumerate() {
			if i > 0 {
				query.push(" OR ");
			}
			query.push(format_args!("\"{}\" LIKE ", field));
			query.push_bind(self.pattern.as_str());
			query.push(" ESCAPE '\\'");
		}
	}
}

#[async_trait]
impl QuerySet for SqliteQuerySet {
	async fn count(&self) -> ClResult<u64> {
		let mut query = QueryBuilder::new(format!(
			"SELECT COUNT(*) AS cnt FROM (SELECT DISTINCT \"{}\" FROM \"{}\"",
			self.pk_column, self.table
		));
		self.push_where(&mut query);
		query.push(")");

		let res = query.build().fetch_one(&self.db).await;
		let count: i64 = map_res(res, |row| row.try_get("cnt"))?;
		Ok(u64::try_from(count).unwrap_or_default())
	}

	async fn slice(&self, offset: u64, limit: u64) -> ClResult<Vec<LookupItem>> {
		let mut query = QueryBuilder::new(format!(
			"SELECT DISTINCT \"{pk}\" AS id, CAST(\"{label}\" AS TEXT) AS text FROM \"{table}\"",
			pk = self.pk_column,
			label = self.label_column,
			table = self.table
		));
		self.push_where(&mut query);
		query.push(format_args!(" ORDER BY \"{}\" LIMIT ", self.pk_column));
		query.push_bind(to_sql_int(limit));
		query.push(" OFFSET ");
		query.push_bind(to_sql_int(offset));

		let rows = query
			.build()
			.fetch_all(&self.db)
			.await
			.inspect_err(inspect)
			.or(Err(Error::DbError))?;

		collect_res(rows.iter().map(|row| -> Result<LookupItem, sqlx::Error> {
			let text: Option<String> = row.try_get("text")?;
			Ok(LookupItem { id: row.try_get("id")?, text: text.unwrap_or_default() })
		}))
	}
}


// vim: ts=4
