use portfolio_core_contact_impl::ContactFeatureServiceImpl;
use portfolio_core_health_impl::HealthFeatureServiceImpl;
use portfolio_email_impl::EmailServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = portfolio_api_rest::RestServer<HealthFeature, ContactFeature>;

// Email
pub type Email = EmailServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Template, Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Email>;
