use serde::Serialize;

/// A link in the site header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Link text.
    pub name: &'static str,
    /// Target, either `/` or a section anchor.
    pub href: &'static str,
}

/// The header links, in display order.
pub const SECTIONS: [NavLink; 8] = [
    NavLink { name: "Home", href: "/" },
    NavLink { name: "About", href: "#about" },
    NavLink { name: "Rooms", href: "#rooms" },
    NavLink { name: "Amenities", href: "#amenities" },
    NavLink { name: "Bee Keeping", href: "#bee-keeping" },
    NavLink { name: "Gallery", href: "#gallery" },
    NavLink { name: "Location", href: "#location" },
    NavLink { name: "Contact", href: "#contact" },
];

/// Where the "Book Now" call to action points.
pub const BOOK_NOW: NavLink = NavLink {
    name: "Book Now",
    href: "#contact",
};

/// Open/closed state of the collapsible menu on small screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    /// Whether the menu is expanded.
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Opens a closed menu or closes an open one.
    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Closes the menu.
    pub const fn close(&mut self) {
        self.open = false;
    }

    /// Follows `link`: the menu closes and the link target is returned.
    pub const fn select(&mut self, link: NavLink) -> &'static str {
        self.close();
        link.href
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_starts_closed_and_toggles() {
        let mut menu = MobileMenu::default();
        assert!(!menu.is_open());

        menu.toggle();
        assert!(menu.is_open());

        menu.toggle();
        assert!(!menu.is_open());
    }

    #[test]
    fn selecting_a_link_closes_the_menu() {
        let mut menu = MobileMenu::default();
        menu.toggle();

        assert_eq!(menu.select(SECTIONS[4]), "#bee-keeping");
        assert!(!menu.is_open());
    }

    #[test]
    fn book_now_points_at_contact_section() {
        let contact = SECTIONS.iter().find(|link| link.name == "Contact").unwrap();
        assert_eq!(BOOK_NOW.href, contact.href);
    }
}
