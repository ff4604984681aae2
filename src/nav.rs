//! Navigation ids, routes, and the router that keeps them in sync.

/// Logical navigation destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavId {
    Home,
    Completed,
    Track,
    Assign,
}

impl NavId {
    pub const ALL: [NavId; 4] = [NavId::Home, NavId::Completed, NavId::Track, NavId::Assign];

    pub fn path(&self) -> &'static str {
        match self {
            NavId::Home => "/",
            NavId::Completed => "/completed",
            NavId::Track => "/track",
            NavId::Assign => "/assign",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            NavId::Home => "Home",
            NavId::Completed => "Completed Assignments",
            NavId::Track => "Ongoing Assignments",
            NavId::Assign => "Assign Tasks",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            NavId::Home => '1',
            NavId::Completed => '2',
            NavId::Track => '3',
            NavId::Assign => '4',
        }
    }

    pub fn from_shortcut(key: char) -> Option<NavId> {
        NavId::ALL.into_iter().find(|id| id.shortcut() == key)
    }

    /// Active id for an arbitrary path. Prefix based; unknown paths map to home.
    pub fn from_path(path: &str) -> NavId {
        if path == "/" {
            return NavId::Home;
        }
        [NavId::Completed, NavId::Track, NavId::Assign]
            .into_iter()
            .find(|id| path.starts_with(id.path()))
            .unwrap_or(NavId::Home)
    }

    /// Exact route match (a trailing slash is tolerated).
    pub fn resolve(path: &str) -> Option<NavId> {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        let normalized = if normalized.is_empty() { "/" } else { normalized };
        NavId::ALL.into_iter().find(|id| id.path() == normalized)
    }
}

/// Outcome of a route change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteChange {
    /// Target equals the current location
    Unchanged,
    /// New location pushed onto the history
    Pushed(NavId),
    /// Unknown location replaced by the default route
    Redirected { from: String },
}

/// Browser-style history with a single active nav id kept in sync.
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<String>,
    active: NavId,
}

impl Router {
    pub fn new(initial: &str) -> Self {
        let mut router = Self {
            history: vec![NavId::Home.path().to_string()],
            active: NavId::Home,
        };
        router.replace(initial);
        router
    }

    pub fn location(&self) -> &str {
        self.history
            .last()
            .map(String::as_str)
            .unwrap_or_else(|| NavId::Home.path())
    }

    pub fn active(&self) -> NavId {
        self.active
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Go to `path`, pushing a history entry unless it is the current one.
    pub fn navigate(&mut self, path: &str) -> RouteChange {
        let path = path.trim();
        if path == self.location() {
            return RouteChange::Unchanged;
        }
        match NavId::resolve(path) {
            Some(id) if id.path() == self.location() => {
                self.active = id;
                RouteChange::Unchanged
            }
            Some(id) => {
                self.history.push(id.path().to_string());
                self.sync_active();
                RouteChange::Pushed(id)
            }
            None => {
                self.redirect_home();
                RouteChange::Redirected {
                    from: path.to_string(),
                }
            }
        }
    }

    /// Nav item activation: local state always updates, history only when the
    /// target differs from the current location.
    pub fn activate(&mut self, id: NavId) -> RouteChange {
        self.active = id;
        if self.location() == id.path() {
            return RouteChange::Unchanged;
        }
        self.history.push(id.path().to_string());
        self.sync_active();
        RouteChange::Pushed(id)
    }

    /// Pop one history entry. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.history.len() <= 1 {
            return false;
        }
        self.history.pop();
        self.sync_active();
        true
    }

    fn replace(&mut self, path: &str) {
        match NavId::resolve(path) {
            Some(id) => {
                if let Some(last) = self.history.last_mut() {
                    *last = id.path().to_string();
                }
                self.sync_active();
            }
            None => self.redirect_home(),
        }
    }

    fn redirect_home(&mut self) {
        if self.location() != NavId::Home.path() {
            self.history.push(NavId::Home.path().to_string());
        }
        self.sync_active();
    }

    fn sync_active(&mut self) {
        self.active = NavId::from_path(self.location());
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(NavId::Home.path())
    }
}
