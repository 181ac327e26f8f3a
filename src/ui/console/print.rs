use std::cell::RefCell;
use std::fmt::Display;
use std::io::Write;
use std::rc::Rc;

/// [`Printer`] writes messages line by line into a shared output (stdout by default).
///
/// Clones share the same output, so the debugger hook and the prompt loop print into one stream.
#[derive(Clone)]
pub struct Printer {
    out: Rc<RefCell<dyn Write>>,
}

impl Printer {
    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: Rc::new(RefCell::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    pub fn print(&self, msg: impl Display) {
        let mut out = self.out.borrow_mut();
        _ = writeln!(out, "{msg}");
        _ = out.flush();
    }
}

pub mod style {
    use crossterm::style::{Color, Stylize};
    use std::fmt::{Display, Formatter};
    use std::sync::atomic::{AtomicBool, Ordering};

    const UNKNOWN_PLACEHOLDER: &str = "???";

    static COLORED: AtomicBool = AtomicBool::new(true);

    /// Disable output coloring (plain text for pipes and tests).
    pub fn disable_colors() {
        COLORED.store(false, Ordering::SeqCst)
    }

    #[inline(always)]
    fn is_colored() -> bool {
        COLORED.load(Ordering::SeqCst)
    }

    struct View<T: Display> {
        inner: Option<T>,
        color: Color,
    }

    impl<T: Display> Display for View<T> {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            let text = self
                .inner
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| UNKNOWN_PLACEHOLDER.to_string());

            if is_colored() {
                f.write_fmt(format_args!("{}", text.with(self.color)))
            } else {
                f.write_str(&text)
            }
        }
    }

    /// Construct structure declaration to display data of the same type (addresses, errors, etc.).
    macro_rules! view_struct {
        ($name: ident, $color: expr) => {
            pub struct $name<T: Display>(View<T>);

            impl<T: Display> From<T> for $name<T> {
                fn from(value: T) -> Self {
                    Self(View {
                        inner: Some(value),
                        color: $color,
                    })
                }
            }

            impl<T: Display> From<Option<T>> for $name<T> {
                fn from(value: Option<T>) -> Self {
                    Self(View {
                        inner: value,
                        color: $color,
                    })
                }
            }

            impl<T: Display> Display for $name<T> {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    self.0.fmt(f)
                }
            }
        };
    }

    view_struct!(AddressView, Color::Blue);
    view_struct!(KeywordView, Color::Magenta);
    view_struct!(ErrorView, Color::Red);
}
