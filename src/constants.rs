//! CSS selectors and in-page scripts tied to the forum's current markup.
//!
//! These are utility-class selectors and will break when the site ships a
//! redesign; they are kept in one place so an update is a single diff.

/// Container that signals the comment page has rendered.
pub const READY_CONTAINER: &str = "div.w-full.md\\:rounded.bg-surface-primary";

/// The comment body text block (first match).
pub const CONTENT_BLOCK: &str = "div.break-words.py-2.text-secondary";

/// Timestamp elements; the second match is the comment's own timestamp
/// (the first belongs to the thread).
pub const COMMENT_TIMESTAMP: &str = "time.text-tertiary.text-xs";

/// Primary sticky header bar.
pub const STICKY_HEADER_PRIMARY: &str = "div.flex-none.sticky.left-0.top-0.z-\\[51\\]";

/// Secondary sticky tab strip pinned below the header bar.
pub const STICKY_HEADER_TABS: &str =
    "ul.flex.w-full.list-none.items-center.sticky.top-\\[52px\\].z-10";

/// Layout anchors bounding the comment region. Each is optional on any given
/// page; the capture rectangle is the union of whichever are present.
pub const ANCHOR_SELECTORS: [&str; 4] = [
    "div.relative.flex.w-full.justify-between.px-4.py-2",
    "div.w-full.px-4 > div.htmlContentRenderer_html-content__ePjqJ",
    "div.my-2.flex.cursor-pointer.px-4",
    "div.flex.w-full.justify-between.px-4.pb-2",
];

/// Cookie consent accept button, matched by class plus label text.
pub const COOKIE_BUTTON: &str = "button.button_primary__PYJul";
pub const COOKIE_BUTTON_LABEL: &str = "Terima";

/// Mobile app install prompt's "continue in browser" button.
pub const APP_PROMPT_BUTTON: &str = "button.installApp_installAppButton__VlHyw";
pub const APP_PROMPT_LABEL: &str = "Lanjutkan";

/// Close button on the bottom ad banner.
pub const AD_CLOSE_BUTTON: &str = "div.absolute.-top-\\[30px\\].right-0.cursor-pointer.overflow-hidden.rounded-l-lg.bg-white.p-1.pb-\\[10px\\].pt-1.text-center.text-secondary.shadow-\\[0_-1px_1px_0_rgba\\(0\\,0\\,0\\,0\\.2\\)\\].dark\\:bg-grey-7";

/// Appends a tall transparent spacer to the document body so lazy-loaded ads
/// below the fold cannot shift the comment region after it is measured.
pub const SPACER_SCRIPT: &str = r"(() => {
    const div = document.createElement('div');
    div.style.height = '2000px';
    div.style.width = '100%';
    div.style.background = 'transparent';
    document.body.appendChild(div);
    return true;
})()";
