//! The tables page: data loading, context menus and HTML rendering.

use common::errors::{AppError, AppResult};
use common::models::{MenuItem, TableList};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use tracing::debug;

use crate::backend::ListingBackend;
use crate::menu::{build_menu, select_menu_database};

const MACROS_TEMPLATE: &str = include_str!("../templates/macros.html");
const TABLES_TEMPLATE: &str = include_str!("../templates/tables.html");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

const PAGE_TITLE: &str = "Tables";

/// Query string accepted by the tables page.
///
/// Both parameters are parsed and logged but do not filter or page the
/// listing yet.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Search text.
    pub q: Option<String>,
    /// Pagination cursor.
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    pub fn offset(&self) -> &str {
        self.offset.as_deref().unwrap_or("0")
    }
}

/// Everything the page shows, fetched for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    pub menu: Vec<MenuItem>,
    pub table: TableList,
}

/// Fetches the sidebar menu.
///
/// Lists the databases, then the tables of the menu database if one is
/// selected. The default database plays no part here.
pub async fn load_menu(backend: &dyn ListingBackend) -> AppResult<Vec<MenuItem>> {
    let databases = backend.list_databases().await?;

    let selected = match select_menu_database(&databases.databases) {
        Some(database) => Some(backend.list_tables(database).await?),
        None => None,
    };
    debug!(
        databases = databases.databases.len(),
        menu_database = selected.as_ref().map(|t| t.database.as_str()),
        "菜单数据已加载"
    );

    Ok(build_menu(
        selected
            .as_ref()
            .map(|t| (t.database.as_str(), t.tables.as_slice())),
    ))
}

/// Fetches the menu and the default database's tables.
///
/// The menu and the default table list are independent and are fetched
/// together. Any backend failure fails the whole page.
pub async fn load_page(backend: &dyn ListingBackend, default_database: &str) -> AppResult<PageData> {
    let (menu, table) = tokio::try_join!(
        load_menu(backend),
        backend.list_tables(default_database),
    )?;
    debug!(rows = table.tables.len(), "页面数据已加载");

    Ok(PageData { menu, table })
}

/// Actions offered on a database menu node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextMenu {
    pub database_name: String,
    pub actions: Vec<ContextAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextAction {
    pub label: String,
    pub href: String,
}

/// Context menu for a menu node.
///
/// Only nodes backed by a real database get one; static navigation entries
/// and table leaves return `None`.
pub fn context_menu(item: &MenuItem) -> Option<ContextMenu> {
    if !item.database_backed {
        return None;
    }
    Some(ContextMenu {
        database_name: item.key.clone(),
        actions: vec![ContextAction {
            label: "List tables".to_string(),
            href: format!("/api/databases/{}/tables", urlencoding::encode(&item.key)),
        }],
    })
}

#[derive(Serialize)]
struct MenuNodeView<'a> {
    key: &'a str,
    label: &'a str,
    leaf: bool,
    children: Vec<MenuNodeView<'a>>,
    context_menu: Option<ContextMenu>,
}

impl<'a> MenuNodeView<'a> {
    fn from_item(item: &'a MenuItem) -> Self {
        Self {
            key: &item.key,
            label: &item.label,
            leaf: item.is_leaf(),
            children: item.children.iter().map(Self::from_item).collect(),
            context_menu: context_menu(item),
        }
    }
}

#[derive(Serialize)]
struct PageView<'a> {
    title: &'a str,
    menu: Vec<MenuNodeView<'a>>,
    database: &'a str,
    tables: &'a [String],
}

#[derive(Serialize)]
struct ErrorView<'a> {
    title: &'a str,
    status: u16,
    code: &'a str,
    message: String,
    request_id: Option<&'a str>,
}

/// Renders pages from the embedded templates.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Compiles the embedded templates.
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("macros.html", MACROS_TEMPLATE),
            ("tables.html", TABLES_TEMPLATE),
            ("error.html", ERROR_TEMPLATE),
        ])
        .map_err(template_error)?;
        Ok(Self { tera })
    }

    /// Renders the tables page.
    pub fn render_page(&self, data: &PageData) -> AppResult<String> {
        let view = PageView {
            title: PAGE_TITLE,
            menu: data.menu.iter().map(MenuNodeView::from_item).collect(),
            database: &data.table.database,
            tables: &data.table.tables,
        };
        self.render("tables.html", &view)
    }

    /// Renders the error page for a failed request.
    pub fn render_error(&self, error: &AppError, request_id: Option<&str>) -> AppResult<String> {
        let view = ErrorView {
            title: PAGE_TITLE,
            status: error.status_code().as_u16(),
            code: error.code(),
            message: error.to_string(),
            request_id,
        };
        self.render("error.html", &view)
    }

    fn render(&self, template: &str, view: &impl Serialize) -> AppResult<String> {
        let context = Context::from_serialize(view).map_err(template_error)?;
        self.tera.render(template, &context).map_err(template_error)
    }
}

fn template_error(e: tera::Error) -> AppError {
    use std::error::Error as _;

    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    AppError::Template(message)
}
