use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<String>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: String,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| Ok(result));
        self
    }
}

/// Data for an email body template.
///
/// `NAME` is the file name of the template. Templates whose name ends in
/// `.html` are rendered with HTML autoescaping.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEMPLATE: &'static str;
}

pub const BASE_TEMPLATE: (&str, &str) = ("base.html", include_str!("../templates/base.html"));

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = $path;
                const TEMPLATE: &'static str = include_str!(concat!("../templates/", $path));
            }
        )*

        pub const TEMPLATES: &[(&str, &str)] = &[
            $( ($ident::NAME, $ident::TEMPLATE) ),*
        ];
    };
}

templates! {
    OwnerNotificationTemplate("owner_notification.html"),
    SenderAcknowledgmentTemplate("sender_acknowledgment.html"),
}

/// Notification sent to the site owner for every contact form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerNotificationTemplate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Automatic reply to the visitor who submitted the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderAcknowledgmentTemplate {
    pub name: String,
    pub message: String,
    pub owner_name: String,
}
