//! Physical page geometry.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Line width and lines per page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageRaw", into = "PageRaw")]
pub struct Page {
    linesize: usize,
    pagesize: usize,
}

#[derive(Serialize, Deserialize)]
struct PageRaw {
    linesize: usize,
    pagesize: usize,
}

impl From<Page> for PageRaw {
    fn from(page: Page) -> Self {
        PageRaw {
            linesize: page.linesize,
            pagesize: page.pagesize,
        }
    }
}

impl TryFrom<PageRaw> for Page {
    type Error = LayoutError;

    fn try_from(raw: PageRaw) -> Result<Self> {
        Page::new(raw.linesize, raw.pagesize)
    }
}

impl Page {
    /// Create a page; both dimensions must be positive.
    pub fn new(linesize: usize, pagesize: usize) -> Result<Self> {
        if linesize == 0 || pagesize == 0 {
            return Err(LayoutError::InvalidPage { linesize, pagesize });
        }
        Ok(Page { linesize, pagesize })
    }

    /// Character columns per line.
    pub fn linesize(&self) -> usize {
        self.linesize
    }

    /// Lines per physical page.
    pub fn pagesize(&self) -> usize {
        self.pagesize
    }
}
