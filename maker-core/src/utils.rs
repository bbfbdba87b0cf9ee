//! Utility functions for the container

/// Naming convention utilities for bean names
pub mod naming {
    /// Converts a PascalCase type name to camelCase for bean naming.
    ///
    /// This is the default bean naming strategy, similar to Spring's behavior
    /// where `UserService` becomes `userService`.
    ///
    /// # Examples
    ///
    /// ```
    /// use maker_core::utils::naming::to_camel_case;
    ///
    /// assert_eq!(to_camel_case("UserService"), "userService");
    /// assert_eq!(to_camel_case("A"), "a");
    /// assert_eq!(to_camel_case(""), "");
    /// ```
    pub fn to_camel_case(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => {
                let mut result = String::with_capacity(s.len());
                result.extend(first.to_lowercase());
                result.push_str(chars.as_str());
                result
            }
        }
    }

    /// Strips the module path and generic arguments from a type name.
    ///
    /// ```
    /// use maker_core::utils::naming::simple_type_name;
    ///
    /// assert_eq!(simple_type_name("app::service::UserService"), "UserService");
    /// assert_eq!(simple_type_name("app::Holder<app::Item>"), "Holder");
    /// ```
    pub fn simple_type_name(type_name: &str) -> &str {
        let base = type_name.split('<').next().unwrap_or(type_name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

/// Dependency resolution utilities
pub mod dependency {
    use std::ops::{Deref, DerefMut};

    use crate::error::{ContainerError, ContainerResult};

    /// The chain of beans currently being created by one resolution.
    ///
    /// Every top-level `get_bean` starts a fresh chain, so concurrent lookups on
    /// different threads never see each other's in-progress names.
    #[derive(Debug, Default, Clone)]
    pub struct CreationChain {
        names: Vec<String>,
    }

    impl CreationChain {
        /// Creates a new empty chain.
        pub fn new() -> Self {
            Self::default()
        }

        /// Checks if a bean is currently being created in this chain.
        pub fn is_creating(&self, name: &str) -> bool {
            self.names.iter().any(|n| n == name)
        }

        /// Marks a bean as being created; the mark is removed when the
        /// returned frame is dropped.
        ///
        /// # Errors
        ///
        /// Returns `CircularDependency` carrying the full chain if `name` is
        /// already in progress.
        pub fn enter(&mut self, name: &str) -> ContainerResult<CreationFrame<'_>> {
            if self.is_creating(name) {
                let mut chain = self.names.clone();
                chain.push(name.to_string());
                return Err(ContainerError::CircularDependency { chain });
            }
            self.names.push(name.to_string());
            Ok(CreationFrame { chain: self })
        }

        /// Beans currently in progress, outermost first.
        pub fn current_creating(&self) -> &[String] {
            &self.names
        }

        pub fn depth(&self) -> usize {
            self.names.len()
        }
    }

    /// RAII guard for one entry of a [`CreationChain`].
    #[derive(Debug)]
    pub struct CreationFrame<'a> {
        chain: &'a mut CreationChain,
    }

    impl Deref for CreationFrame<'_> {
        type Target = CreationChain;

        fn deref(&self) -> &Self::Target {
            self.chain
        }
    }

    impl DerefMut for CreationFrame<'_> {
        fn deref_mut(&mut self) -> &mut Self::Target {
            self.chain
        }
    }

    impl Drop for CreationFrame<'_> {
        fn drop(&mut self) {
            self.chain.names.pop();
        }
    }
}
