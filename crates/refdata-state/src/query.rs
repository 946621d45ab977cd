//! # Query State
//!
//! Selection, search and paging over one structure's elements.
//!
//! ## States
//!
//! - `Unselected`: no structure loaded; query, page and result window are
//!   empty.
//! - `Loaded`: a structure definition is held, and every search or page
//!   change re-enters `Loaded` with a fresh result window.
//!
//! ## Request tokens
//!
//! Every transition is split into a `begin_*` step that updates local state
//! and returns a ticket describing the request to issue, and a `finish_*`
//! step that applies the response. Each `begin_*` bumps a monotonically
//! increasing token; a response whose ticket carries an older token is
//! ignored. Callers that issue requests concurrently (e.g. from spawned
//! tasks) therefore always end with the window of the latest transition.
//! The `select_structure`, `search` and `goto_page` drivers run both steps
//! back to back.
//!
//! Search and list failures clear the displayed data rather than keeping
//! stale results.

use refdata_core::{
    Element, ElementPage, ElementQuery, Pagination, RemoteError, RemoteGateway, Structure,
    StructureId, PAGE_SIZE,
};
use thiserror::Error;

/// Coarse state of a [`QueryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Unselected,
    Loaded,
}

/// Whether a response was applied or dropped as outdated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Current,
    Stale,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// `search`/`goto_page` called with no structure loaded.
    #[error("no structure is loaded")]
    NotLoaded,

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// A pending structure fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    structure_id: StructureId,
}

impl FetchTicket {
    pub fn structure_id(&self) -> &StructureId {
        &self.structure_id
    }
}

/// A pending element search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    token: u64,
    structure_id: StructureId,
    query: ElementQuery,
}

impl SearchTicket {
    pub fn structure_id(&self) -> &StructureId {
        &self.structure_id
    }

    pub fn query(&self) -> &ElementQuery {
        &self.query
    }
}

/// Search/pagination state for the element browser.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    structures: Vec<Structure>,
    selected_id: Option<StructureId>,
    structure: Option<Structure>,
    query: String,
    page: u64,
    items: Vec<Element>,
    total: u64,
    token: u64,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn phase(&self) -> QueryPhase {
        if self.structure.is_some() {
            QueryPhase::Loaded
        } else {
            QueryPhase::Unselected
        }
    }

    /// Structures offered by the picker, as of the last refresh.
    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Id chosen by the last selection, set before its fetch completes.
    pub fn selected_id(&self) -> Option<&StructureId> {
        self.selected_id.as_ref()
    }

    pub fn structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        PAGE_SIZE
    }

    pub fn items(&self) -> &[Element] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, PAGE_SIZE, self.total)
    }

    /// The result window rendered as cells in field order. Empty when
    /// unselected.
    pub fn table_rows(&self) -> Vec<Vec<String>> {
        match &self.structure {
            Some(s) => self.items.iter().map(|e| s.display_row(e)).collect(),
            None => Vec::new(),
        }
    }

    // ── Transitions ─────────────────────────────────────────────────

    fn clear_window(&mut self) {
        self.items.clear();
        self.total = 0;
    }

    fn require_loaded(&self) -> Result<&Structure, QueryError> {
        self.structure.as_ref().ok_or(QueryError::NotLoaded)
    }

    fn search_ticket(&self, structure_id: StructureId) -> SearchTicket {
        SearchTicket {
            token: self.token,
            structure_id,
            query: ElementQuery {
                q: self.query.clone(),
                offset: self.pagination().offset(),
                limit: PAGE_SIZE,
            },
        }
    }

    /// Start selecting `id`. Query, page and window reset immediately.
    ///
    /// An empty id moves straight to `Unselected` and returns `None`.
    pub fn begin_select(&mut self, id: &str) -> Option<FetchTicket> {
        self.token += 1;
        self.query.clear();
        self.page = 0;
        self.clear_window();
        self.structure = None;
        if id.is_empty() {
            self.selected_id = None;
            return None;
        }
        let structure_id = StructureId::new(id);
        self.selected_id = Some(structure_id.clone());
        Some(FetchTicket {
            token: self.token,
            structure_id,
        })
    }

    /// Apply the structure fetch. On success returns the initial unfiltered
    /// first-page search to issue; `Ok(None)` means the ticket was stale.
    pub fn finish_select(
        &mut self,
        ticket: FetchTicket,
        result: Result<Structure, RemoteError>,
    ) -> Result<Option<SearchTicket>, QueryError> {
        if ticket.token != self.token {
            tracing::debug!(structure_id = %ticket.structure_id, "dropping stale structure fetch");
            return Ok(None);
        }
        match result {
            Ok(structure) => {
                tracing::debug!(structure_id = %structure.id, "structure loaded");
                self.structure = Some(structure);
                self.query.clear();
                self.page = 0;
                Ok(Some(self.search_ticket(ticket.structure_id)))
            }
            Err(e) => {
                tracing::warn!(structure_id = %ticket.structure_id, error = %e, "structure fetch failed");
                self.selected_id = None;
                self.structure = None;
                self.clear_window();
                Err(QueryError::Remote(e))
            }
        }
    }

    /// Start a search for `query` from page 0.
    pub fn begin_search(&mut self, query: &str) -> Result<SearchTicket, QueryError> {
        let structure_id = self.require_loaded()?.id.clone();
        self.token += 1;
        self.query = query.to_string();
        self.page = 0;
        Ok(self.search_ticket(structure_id))
    }

    /// Start fetching page `page` of the current query.
    ///
    /// `page` is not bounds-checked; an out-of-range page yields whatever the
    /// backend returns, typically no items.
    pub fn begin_goto_page(&mut self, page: u64) -> Result<SearchTicket, QueryError> {
        let structure_id = self.require_loaded()?.id.clone();
        self.token += 1;
        self.page = page;
        Ok(self.search_ticket(structure_id))
    }

    /// Apply a search response. A failure clears the window.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<ElementPage, RemoteError>,
    ) -> Result<Freshness, QueryError> {
        if ticket.token != self.token {
            tracing::debug!(
                structure_id = %ticket.structure_id,
                offset = ticket.query.offset,
                "dropping stale search response"
            );
            return Ok(Freshness::Stale);
        }
        match result {
            Ok(page) => {
                tracing::debug!(
                    structure_id = %ticket.structure_id,
                    page = self.page,
                    total = page.total,
                    "search results applied"
                );
                self.items = page.items;
                self.total = page.total;
                Ok(Freshness::Current)
            }
            Err(e) => {
                tracing::warn!(structure_id = %ticket.structure_id, error = %e, "element search failed");
                self.clear_window();
                Err(QueryError::Remote(e))
            }
        }
    }

    // ── Drivers ─────────────────────────────────────────────────────

    async fn run_search<G>(&mut self, gateway: &G, ticket: SearchTicket) -> Result<(), QueryError>
    where
        G: RemoteGateway + ?Sized,
    {
        let result = gateway
            .search_elements(ticket.structure_id(), ticket.query())
            .await;
        self.finish_search(ticket, result).map(|_| ())
    }

    /// Select a structure and load its first unfiltered page.
    pub async fn select_structure<G>(&mut self, gateway: &G, id: &str) -> Result<(), QueryError>
    where
        G: RemoteGateway + ?Sized,
    {
        let Some(fetch) = self.begin_select(id) else {
            return Ok(());
        };
        let result = gateway.get_structure(fetch.structure_id()).await;
        match self.finish_select(fetch, result)? {
            Some(search) => self.run_search(gateway, search).await,
            None => Ok(()),
        }
    }

    /// Search the loaded structure for `query`, from page 0.
    pub async fn search<G>(&mut self, gateway: &G, query: &str) -> Result<(), QueryError>
    where
        G: RemoteGateway + ?Sized,
    {
        let ticket = self.begin_search(query)?;
        self.run_search(gateway, ticket).await
    }

    /// Fetch page `page` of the current query.
    pub async fn goto_page<G>(&mut self, gateway: &G, page: u64) -> Result<(), QueryError>
    where
        G: RemoteGateway + ?Sized,
    {
        let ticket = self.begin_goto_page(page)?;
        self.run_search(gateway, ticket).await
    }

    /// Reload the structure picker. A failure leaves the list empty.
    pub async fn refresh_structures<G>(&mut self, gateway: &G, q: &str) -> Result<(), QueryError>
    where
        G: RemoteGateway + ?Sized,
    {
        match gateway.list_structures(q).await {
            Ok(list) => {
                self.structures = list;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "structure list failed");
                self.structures.clear();
                Err(QueryError::Remote(e))
            }
        }
    }
}
