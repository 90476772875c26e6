//! Connectivity
//!
//! Tracks online/offline transitions reported by the platform and derives the
//! offline banner. Purely presentational: nothing is gated or queued on it.

/// Text of the banner shown while offline
pub const OFFLINE_BANNER: &str = "Offline Mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn from_online(online: bool) -> Self {
        if online {
            Connectivity::Online
        } else {
            Connectivity::Offline
        }
    }

    pub fn is_online(self) -> bool {
        self == Connectivity::Online
    }
}

/// Last reported connectivity state
#[derive(Debug, Clone)]
pub struct ConnectivityMonitor {
    status: Connectivity,
}

impl ConnectivityMonitor {
    pub fn new(initial: Connectivity) -> Self {
        Self { status: initial }
    }

    pub fn status(&self) -> Connectivity {
        self.status
    }

    /// Record a platform notification; returns true when the state changed
    pub fn observe(&mut self, status: Connectivity) -> bool {
        if self.status == status {
            return false;
        }

        match status {
            Connectivity::Online => tracing::info!("Connection restored"),
            Connectivity::Offline => tracing::warn!("Connection lost"),
        }
        self.status = status;
        true
    }

    /// Banner to render, if any
    pub fn banner(&self) -> Option<&'static str> {
        match self.status {
            Connectivity::Online => None,
            Connectivity::Offline => Some(OFFLINE_BANNER),
        }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(Connectivity::Online)
    }
}
