use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Expr, GenericArgument, Ident, PathArguments, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    token,
};

/// One `name: Type = default_value` entry of a `config!` block. A nested
/// section is written as `name: Type (PartialType = default_value)`.
struct ConfigField {
    name: Ident,
    ty: Type,
    default_value: Expr,
    partial_ty: Option<Type>,
}

impl Parse for ConfigField {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty: Type = input.parse()?;

        let (partial_ty, default_value) = if input.peek(token::Paren) {
            let content;
            syn::parenthesized!(content in input);
            let partial_ty: Type = content.parse()?;
            content.parse::<Token![=]>()?;
            (Some(partial_ty), content.parse::<Expr>()?)
        } else {
            input.parse::<Token![=]>()?;
            (None, input.parse::<Expr>()?)
        };

        Ok(ConfigField {
            name,
            ty,
            default_value,
            partial_ty,
        })
    }
}

struct ConfigInput {
    vis: Visibility,
    name: Ident,
    fields: Punctuated<ConfigField, Token![,]>,
}

impl Parse for ConfigInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let vis: Visibility = input.parse()?;
        input.parse::<Token![struct]>()?;
        let name: Ident = input.parse()?;
        let content;
        syn::braced!(content in input);
        let fields = content.parse_terminated(ConfigField::parse, Token![,])?;
        Ok(ConfigInput {
            vis,
            name,
            fields,
        })
    }
}

/// `Option<T>` fields are already optional in the partial struct.
fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(last) = path.path.segments.last() else {
        return false;
    };
    if last.ident != "Option" {
        return false;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) => {
            args.args.len() == 1 && matches!(args.args[0], GenericArgument::Type(_))
        }
        _ => false,
    }
}

/// Generates a configuration struct with default_assignments, a `Partial*` twin that is
/// deserialized from TOML, and `with_*`/`set_*`/`get_*` methods.
#[proc_macro]
pub fn config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as ConfigInput);
    let vis = &input.vis;
    let struct_name = &input.name;
    let partial_struct_name = format_ident!("Partial{}", struct_name);

    let mut fields = Vec::new();
    let mut partial_fields = Vec::new();
    let mut from_partial_assignments = Vec::new();
    let mut default_assignments = Vec::new();
    let mut methods = Vec::new();

    for config_field in &input.fields {
        let field = &config_field.name;
        let ty = &config_field.ty;
        let default_value = &config_field.default_value;

        let final_partial_ty = match &config_field.partial_ty {
            Some(partial_ty) => quote! { #partial_ty },
            None if is_option(ty) => quote! { #ty },
            None => quote! { Option<#ty> },
        };

        fields.push(quote! { #field: #ty });
        partial_fields.push(quote! {
            #[serde(default)]
            #field: #final_partial_ty
        });
        from_partial_assignments.push(quote! { #field: partial.#field.into_or(#default_value) });
        default_assignments.push(quote! { #field: #default_value });

        let with = format_ident!("with_{}", field);
        let set = format_ident!("set_{}", field);
        let get = format_ident!("get_{}", field);
        methods.push(quote! {
            pub fn #with(mut self, #field: #ty) -> Self {
                self.#field = #field;
                self
            }
            pub fn #set(&mut self, #field: #ty) {
                self.#field = #field;
            }
            pub fn #get(&self) -> &#ty {
                &self.#field
            }
        });
    }

    let expanded = quote! {
        #[derive(Debug, Clone, serde::Serialize)]
        #vis struct #struct_name {
            #( #fields, )*
        }

        #[derive(Debug, Clone, Default, serde::Deserialize)]
        #vis struct #partial_struct_name {
            #( #partial_fields, )*
        }

        impl #struct_name {
            pub fn from_partial(partial: #partial_struct_name) -> Self {
                use crate::config::IntoOr;
                Self {
                    #( #from_partial_assignments, )*
                }
            }
            pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
                Ok(Self::from_partial(toml::from_str(content)?))
            }
            pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
                let content = std::fs::read_to_string(std::fs::canonicalize(file_path)?)?;
                Self::from_toml_str(&content)
            }
            pub fn from_optional_file<P: AsRef<std::path::Path>>(file_path: Option<P>) -> anyhow::Result<Self> {
                match file_path {
                    Some(path) => Self::from_file(path),
                    None => Ok(Self::default()),
                }
            }
            #( #methods )*
        }

        impl Default for #struct_name {
            fn default() -> Self {
                #struct_name {
                    #( #default_assignments, )*
                }
            }
        }

        impl crate::config::IntoOr<#struct_name> for Option<#partial_struct_name> {
            fn into_or(self, or: #struct_name) -> #struct_name {
                match self {
                    Some(partial) => #struct_name::from_partial(partial),
                    None => or,
                }
            }
        }
    };
    TokenStream::from(expanded)
}
