pub mod template_loader;
