use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, Ident, Index, Lit,
    LitStr, Type,
};

/// Which byte orders a container hook covers.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Orders {
    Any,
    Big,
    Little,
}

impl Orders {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "big" => Ok(Orders::Big),
            "little" => Ok(Orders::Little),
            other => Err(syn::Error::new(
                lit.span(),
                format!("unknown byte order `{other}`, expected \"big\" or \"little\""),
            )),
        }
    }

    fn condition(self, order: &syn::Ident) -> TokenStream2 {
        match self {
            Orders::Any => quote!(true),
            Orders::Big => quote!(#order.is_big_endian()),
            Orders::Little => quote!(!#order.is_big_endian()),
        }
    }
}

#[derive(Default)]
struct ContainerAttrs {
    marshal: Option<Orders>,
    unmarshal: Option<Orders>,
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("wire")) {
        attr.parse_nested_meta(|meta| {
            let orders = if meta.input.peek(syn::Token![=]) {
                Orders::parse(&meta.value()?.parse::<LitStr>()?)?
            } else {
                Orders::Any
            };
            if meta.path.is_ident("custom") {
                out.marshal = Some(orders);
                out.unmarshal = Some(orders);
            } else if meta.path.is_ident("marshal") {
                out.marshal = Some(orders);
            } else if meta.path.is_ident("unmarshal") {
                out.unmarshal = Some(orders);
            } else {
                return Err(meta.error("expected `custom`, `marshal` or `unmarshal`"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// The ordinal tag of a field, passed through to the resolver as text.
fn parse_field_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut tag = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("wire")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("ordinal") {
                return Err(meta.error("expected `ordinal`"));
            }
            tag = Some(match meta.value()?.parse::<Lit>()? {
                Lit::Str(s) => s.value(),
                Lit::Int(i) => i.base10_digits().to_string(),
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "expected a string or integer",
                    ))
                }
            });
            Ok(())
        })?;
    }
    Ok(tag)
}

struct FieldSpec {
    name: String,
    member: TokenStream2,
    ty: Type,
    tag: Option<String>,
}

impl FieldSpec {
    fn is_excluded(&self) -> bool {
        self.tag.as_deref() == Some("-")
    }

    fn tag_tokens(&self) -> TokenStream2 {
        match &self.tag {
            Some(tag) => quote!(::core::option::Option::Some(#tag)),
            None => quote!(::core::option::Option::None),
        }
    }
}

fn collect_fields(fields: &Fields) -> syn::Result<Vec<FieldSpec>> {
    let mut out = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        let (name, member) = match &field.ident {
            Some(ident) => (ident.to_string(), quote!(#ident)),
            None => {
                let index = Index::from(i);
                (i.to_string(), quote!(#index))
            }
        };
        out.push(FieldSpec {
            name,
            member,
            ty: field.ty.clone(),
            tag: parse_field_tag(&field.attrs)?,
        });
    }
    Ok(out)
}

fn mentions_any(tokens: TokenStream2, params: &[Ident]) -> bool {
    tokens.into_iter().any(|tt| match tt {
        TokenTree::Ident(ident) => params.contains(&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), params),
        _ => false,
    })
}

fn impl_derive_wire(mut ast: DeriveInput) -> syn::Result<TokenStream2> {
    let data_struct = match &ast.data {
        Data::Struct(data_struct) => data_struct,
        _ => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "Wire can only be derived for structs",
            ))
        }
    };
    let container = parse_container_attrs(&ast.attrs)?;
    let fields = collect_fields(&data_struct.fields)?;

    // Only fields that reach the generated views need `Wire`; excluded
    // fields and fields hidden behind an all-orders hook do not.
    let walks_fields =
        container.marshal != Some(Orders::Any) || container.unmarshal != Some(Orders::Any);
    let params: Vec<Ident> = ast.generics.type_params().map(|p| p.ident.clone()).collect();
    if walks_fields && !params.is_empty() {
        let where_clause = ast.generics.make_where_clause();
        for field in fields.iter().filter(|f| !f.is_excluded()) {
            let ty = &field.ty;
            if mentions_any(quote!(#ty), &params) {
                where_clause
                    .predicates
                    .push(parse_quote!(#ty: ::wirebin::Wire));
            }
        }
    }
    let struct_name = &ast.ident;
    let (impl_generics, type_generics, where_clause) = ast.generics.split_for_impl();

    let order = format_ident!("order");

    let encode_fields: Vec<_> = fields
        .iter()
        .map(|f| {
            let name = &f.name;
            if f.is_excluded() {
                return quote!(::wirebin::Field::excluded(#name));
            }
            let member = &f.member;
            let tag = f.tag_tokens();
            quote!(::wirebin::Field::new(#name, #tag, &self.#member))
        })
        .collect();
    let decode_fields: Vec<_> = fields
        .iter()
        .map(|f| {
            let name = &f.name;
            if f.is_excluded() {
                return quote!(::wirebin::FieldMut::excluded(#name));
            }
            let member = &f.member;
            let tag = f.tag_tokens();
            quote!(::wirebin::FieldMut::new(#name, #tag, &mut self.#member))
        })
        .collect();

    let view_body = match container.marshal {
        Some(Orders::Any) => quote!(::wirebin::View::Custom(self)),
        Some(orders) => {
            let cond = orders.condition(&order);
            quote! {
                if #cond {
                    return ::wirebin::View::Custom(self);
                }
                ::wirebin::View::Fields(::std::vec![#(#encode_fields),*])
            }
        }
        None => quote!(::wirebin::View::Fields(::std::vec![#(#encode_fields),*])),
    };
    let view_mut_body = match container.unmarshal {
        Some(Orders::Any) => quote!(::wirebin::ViewMut::Custom(self)),
        Some(orders) => {
            let cond = orders.condition(&order);
            quote! {
                if #cond {
                    return ::wirebin::ViewMut::Custom(self);
                }
                ::wirebin::ViewMut::Fields(::std::vec![#(#decode_fields),*])
            }
        }
        None => quote!(::wirebin::ViewMut::Fields(::std::vec![#(#decode_fields),*])),
    };

    Ok(quote! {
        impl #impl_generics ::wirebin::Wire for #struct_name #type_generics #where_clause {
            #[allow(unused_variables)]
            fn view(&self, #order: ::wirebin::Endian) -> ::wirebin::View<'_> {
                #view_body
            }

            #[allow(unused_variables)]
            fn view_mut(&mut self, #order: ::wirebin::Endian) -> ::wirebin::ViewMut<'_> {
                #view_mut_body
            }
        }
    })
}

/// Derives `wirebin::Wire` for a struct.
///
/// Fields go on the wire in declaration order unless tagged:
///
/// - `#[wire(ordinal = 2)]` or `#[wire(ordinal = "2")]` places a field at ordinal 2;
/// - `#[wire(ordinal = "-")]` keeps a field off the wire entirely.
///
/// On the struct, `#[wire(custom)]` hands both directions to the type's own
/// `Marshal` and `Unmarshal` impls. `#[wire(marshal)]` and `#[wire(unmarshal)]`
/// do so for one direction, and any of the three may be limited to one byte
/// order with `= "big"` or `= "little"`.
#[proc_macro_derive(Wire, attributes(wire))]
pub fn wire_macro_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    impl_derive_wire(ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
