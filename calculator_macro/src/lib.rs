mod keyword_enum;

use keyword_enum::keyword_enum_inner;
use proc_macro::TokenStream;

/// Turns an enum of `Variant = "keyword"` pairs into a fieldless enum together
/// with a static, case-sensitive keyword table
#[proc_macro_attribute]
pub fn keyword_enum(attr: TokenStream, item: TokenStream) -> TokenStream {
    keyword_enum_inner(attr, item)
}
