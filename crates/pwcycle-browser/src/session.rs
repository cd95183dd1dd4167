use crate::selector::{Selector, Strategy};
use crate::{Error, Result};
use chromiumoxide::browser::Browser;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use pwcycle_core::poll;
use std::time::Duration;
use tokio::task::JoinHandle;

/// One selector/value pair to type into a form
#[derive(Debug, Clone)]
pub struct FormField {
    pub selector: Selector,
    pub value: String,
}

impl FormField {
    pub fn new(selector: Selector, value: impl Into<String>) -> Self {
        Self {
            selector,
            value: value.into(),
        }
    }
}

/// Thin façade over a CDP browser session: navigate, locate with a wait
/// budget, fill forms. The session is exclusively owned by the workflow for
/// the lifetime of the process.
pub struct DriverSession {
    page: Page,
    poll_interval: Duration,
    _browser: Browser,
    // Background task driving the CDP WebSocket handler
    _handler_task: JoinHandle<()>,
}

impl DriverSession {
    /// Connect to a Chrome instance listening on `debugging_port` and adopt
    /// its first page (or open one).
    pub async fn connect(debugging_port: u16, poll_interval: Duration) -> Result<Self> {
        let ws_url = format!("http://localhost:{debugging_port}");

        // Chrome may not be fully ready right after launch
        let (browser, mut handler) = {
            let mut retries = 5;
            loop {
                tracing::debug!("attempting CDP connection to {ws_url}");
                match Browser::connect(&ws_url).await {
                    Ok(result) => {
                        tracing::info!("CDP connection established");
                        break result;
                    }
                    Err(e) => {
                        retries -= 1;
                        if retries == 0 {
                            return Err(Error::Browser(format!(
                                "failed to connect to Chrome after 5 attempts: {e}"
                            )));
                        }
                        tracing::info!("CDP connection attempt failed, retrying ({retries} left)");
                        tokio::time::sleep(Duration::from_millis(500)).await;
                    }
                }
            }
        };

        // The handler stream must be pumped for any command to complete
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {e}");
                }
            }
        });

        // Give Chrome a moment to create its initial page
        tokio::time::sleep(Duration::from_millis(500)).await;

        let page = if let Some(page) = browser
            .pages()
            .await
            .map_err(|e| Error::Browser(e.to_string()))?
            .first()
        {
            page.clone()
        } else {
            browser
                .new_page("about:blank")
                .await
                .map_err(|e| Error::Browser(e.to_string()))?
        };

        Ok(Self {
            page,
            poll_interval,
            _browser: browser,
            _handler_task: handler_task,
        })
    }

    /// Direct the browser to a URL
    pub async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("navigating to {url}");
        self.page
            .goto(url)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        Ok(())
    }

    /// Current page title, empty when the page has none
    pub async fn title(&self) -> String {
        self.page.get_title().await.ok().flatten().unwrap_or_default()
    }

    pub(crate) fn page(&self) -> &Page {
        &self.page
    }

    async fn lookup(page: &Page, strategy: Strategy, value: &str) -> Vec<Element> {
        // A failed query (element absent, page mid-navigation) is simply
        // "no matches yet" to the polling caller.
        match strategy {
            Strategy::Css => page.find_elements(value).await.unwrap_or_default(),
            Strategy::XPath => page.find_xpaths(value).await.unwrap_or_default(),
        }
    }

    /// Immediate presence check, no waiting. Used for the CAPTCHA probe.
    pub async fn element_present(&self, selector: &Selector) -> bool {
        !Self::lookup(&self.page, selector.strategy, &selector.value)
            .await
            .is_empty()
    }

    /// Poll for at least one element matching `selector`, up to its wait
    /// budget.
    pub async fn find_all(&self, selector: &Selector) -> Result<Vec<Element>> {
        let page = self.page.clone();
        let strategy = selector.strategy;
        let value = selector.value.clone();

        let found = poll::until_some(
            move || {
                let page = page.clone();
                let value = value.clone();
                async move {
                    let matches = Self::lookup(&page, strategy, &value).await;
                    if matches.is_empty() { None } else { Some(matches) }
                }
            },
            selector.timeout,
            self.poll_interval,
        )
        .await;

        found.ok_or_else(|| Error::ElementNotFound {
            selector: selector.value.clone(),
            waited: selector.timeout,
        })
    }

    /// Locate each field, clear it, and type its value. With `auto_submit`
    /// the last element filled gets an Enter keystroke.
    pub async fn fill_form(&self, fields: &[FormField], auto_submit: bool) -> Result<()> {
        let mut last: Option<Element> = None;

        for field in fields {
            for element in self.find_all(&field.selector).await? {
                element
                    .click()
                    .await
                    .map_err(|e| Error::Browser(format!("click failed: {e}")))?;
                // chromiumoxide has no clear(); empty the field in-page
                element
                    .call_js_fn("function() { this.value = ''; }", false)
                    .await
                    .map_err(|e| Error::Browser(format!("clear failed: {e}")))?;
                element
                    .type_str(&field.value)
                    .await
                    .map_err(|e| Error::Browser(format!("type failed: {e}")))?;
                last = Some(element);
            }
        }

        if auto_submit {
            if let Some(element) = last {
                element
                    .press_key("Enter")
                    .await
                    .map_err(|e| Error::Browser(format!("submit failed: {e}")))?;
            }
        }

        Ok(())
    }
}
